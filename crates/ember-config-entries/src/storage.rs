//! Versioned JSON persistence
//!
//! Config entries live in a `.storage/` directory next to the hub
//! configuration, wrapped in a small version envelope so future schema
//! migrations have something to key off.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage file wrapper with version tracking
///
/// JSON format:
/// ```json
/// {
///   "version": 1,
///   "minor_version": 1,
///   "key": "ember.config_entries",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageFile<T> {
    /// Major version - breaking changes
    pub version: u32,
    /// Minor version - migrations within major version
    pub minor_version: u32,
    /// Storage key (file identifier)
    pub key: String,
    /// The actual data
    pub data: T,
}

impl<T> StorageFile<T> {
    pub fn new(key: impl Into<String>, data: T, version: u32, minor_version: u32) -> Self {
        Self {
            version,
            minor_version,
            key: key.into(),
            data,
        }
    }
}

/// Storage manager for the `.storage/` directory
#[derive(Debug, Clone)]
pub struct Storage {
    storage_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at the hub config directory.
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: config_dir.as_ref().join(".storage"),
        }
    }

    /// The file path backing a storage key.
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.storage_dir.join(key)
    }

    /// Load a storage file, or `None` if it has never been written.
    pub async fn load<T>(&self, key: &str) -> StorageResult<Option<StorageFile<T>>>
    where
        T: DeserializeOwned,
    {
        let path = self.file_path(key);
        if !path.exists() {
            debug!("Storage file not found: {}", key);
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let storage_file: StorageFile<T> = serde_json::from_str(&content)?;

        debug!(
            "Loaded storage file: {} (v{}.{})",
            key, storage_file.version, storage_file.minor_version
        );
        Ok(Some(storage_file))
    }

    /// Save a storage file, creating the `.storage/` directory on first use.
    ///
    /// Writes atomically by first writing to a temp file, then renaming, so
    /// an interrupted write never leaves a truncated file behind.
    pub async fn save<T>(&self, storage_file: &StorageFile<T>) -> StorageResult<()>
    where
        T: Serialize,
    {
        if !self.storage_dir.exists() {
            fs::create_dir_all(&self.storage_dir).await?;
            debug!("Created storage directory: {:?}", self.storage_dir);
        }

        let path = self.file_path(&storage_file.key);
        let temp_path = self.file_path(&format!("{}.tmp", storage_file.key));

        let content = serde_json::to_string_pretty(storage_file)?;

        // Write to temp file first
        fs::write(&temp_path, &content).await?;

        // Atomic rename
        fs::rename(&temp_path, &path).await?;

        debug!("Saved storage file: {}", storage_file.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        let mut data = HashMap::new();
        data.insert("k".to_string(), 7u32);

        let file = StorageFile::new("test.key", data, 1, 2);
        storage.save(&file).await.unwrap();

        let loaded: StorageFile<HashMap<String, u32>> =
            storage.load("test.key").await.unwrap().unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.minor_version, 2);
        assert_eq!(loaded.data["k"], 7);
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        let file = StorageFile::new("test.key", vec![1u32, 2, 3], 1, 1);
        storage.save(&file).await.unwrap();
        // Overwrite goes through the same temp-then-rename path
        storage.save(&file).await.unwrap();

        assert!(storage.file_path("test.key").exists());
        assert!(!storage.file_path("test.key.tmp").exists());

        let loaded: StorageFile<Vec<u32>> = storage.load("test.key").await.unwrap().unwrap();
        assert_eq!(loaded.data, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());

        let loaded = storage.load::<Vec<u32>>("never.written").await.unwrap();
        assert!(loaded.is_none());
    }
}
