//! Config Entries Manager
//!
//! Tracks persisted connection records, enforces URL uniqueness, and runs
//! unload guards when an entry is torn down.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::entry::ConfigEntry;
use crate::storage::{Storage, StorageFile, StorageResult};

/// Storage key for config entries
pub const STORAGE_KEY: &str = "ember.config_entries";
/// Current storage version
pub const STORAGE_VERSION: u32 = 1;
/// Current minor version
pub const STORAGE_MINOR_VERSION: u32 = 1;

/// Config entries errors
#[derive(Debug, Error)]
pub enum ConfigEntriesError {
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Entry already configured for url {url}")]
    AlreadyConfigured { url: String },

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

pub type ConfigEntriesResult<T> = Result<T, ConfigEntriesError>;

/// Config entries data for storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigEntriesData {
    pub entries: Vec<ConfigEntry>,
}

/// Cleanup callback tied to an entry's lifetime.
///
/// Guards run exactly once, when the entry is unloaded or removed. Platform
/// discovery subscriptions are released this way so a torn-down entry never
/// receives another callback.
pub type UnloadGuard = Box<dyn FnOnce() + Send>;

/// Config Entries Manager
pub struct ConfigEntries {
    /// Storage backend
    storage: Arc<Storage>,

    /// Primary index: entry_id -> ConfigEntry
    entries: DashMap<String, ConfigEntry>,

    /// Uniqueness index: url -> entry_id
    by_url: DashMap<String, String>,

    /// Pending unload guards per entry_id
    unload_guards: DashMap<String, Vec<UnloadGuard>>,
}

impl ConfigEntries {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            entries: DashMap::new(),
            by_url: DashMap::new(),
            unload_guards: DashMap::new(),
        }
    }

    /// Load entries from storage.
    pub async fn load(&self) -> StorageResult<()> {
        if let Some(storage_file) = self.storage.load::<ConfigEntriesData>(STORAGE_KEY).await? {
            info!(
                "Loading {} config entries from storage (v{}.{})",
                storage_file.data.entries.len(),
                storage_file.version,
                storage_file.minor_version
            );
            for entry in storage_file.data.entries {
                self.index_entry(&entry);
            }
        }
        Ok(())
    }

    /// Save entries to storage.
    pub async fn save(&self) -> StorageResult<()> {
        let data = ConfigEntriesData {
            entries: self.entries.iter().map(|r| r.value().clone()).collect(),
        };
        let storage_file =
            StorageFile::new(STORAGE_KEY, data, STORAGE_VERSION, STORAGE_MINOR_VERSION);
        self.storage.save(&storage_file).await?;
        debug!("Saved {} config entries to storage", self.entries.len());
        Ok(())
    }

    fn index_entry(&self, entry: &ConfigEntry) {
        self.by_url
            .insert(entry.url().to_string(), entry.entry_id.clone());
        self.entries.insert(entry.entry_id.clone(), entry.clone());
    }

    fn unindex_entry(&self, entry: &ConfigEntry) {
        self.by_url.remove(entry.url());
        self.entries.remove(&entry.entry_id);
    }

    /// Get an entry by ID.
    pub fn get(&self, entry_id: &str) -> Option<ConfigEntry> {
        self.entries.get(entry_id).map(|r| r.value().clone())
    }

    /// Get the entry configured for a URL, if any.
    pub fn get_by_url(&self, url: &str) -> Option<ConfigEntry> {
        self.by_url
            .get(url)
            .and_then(|entry_id| self.get(&entry_id))
    }

    /// Add a new config entry.
    ///
    /// Rejects a second entry for the same URL: the store never holds two
    /// records with one uniqueness key.
    pub async fn add(&self, entry: ConfigEntry) -> ConfigEntriesResult<ConfigEntry> {
        if self.get_by_url(entry.url()).is_some() {
            return Err(ConfigEntriesError::AlreadyConfigured {
                url: entry.url().to_string(),
            });
        }

        self.index_entry(&entry);
        self.save().await?;

        info!(
            "Added config entry: {} ({}) [{}]",
            entry.title, entry.domain, entry.entry_id
        );
        Ok(entry)
    }

    /// Replace the API token of an existing entry, in place.
    ///
    /// Everything else (entry id, url, title) is left untouched; this is the
    /// reauthentication path.
    pub async fn update_token(
        &self,
        entry_id: &str,
        api_token: impl Into<String>,
    ) -> ConfigEntriesResult<ConfigEntry> {
        let updated = {
            let mut entry = self
                .entries
                .get_mut(entry_id)
                .ok_or_else(|| ConfigEntriesError::NotFound(entry_id.to_string()))?;
            entry.data.api_token = api_token.into();
            entry.modified_at = Utc::now();
            entry.clone()
        };

        self.save().await?;
        debug!("Updated token for config entry: {}", entry_id);
        Ok(updated)
    }

    /// Run (and consume) the unload guards of an entry.
    pub fn unload(&self, entry_id: &str) {
        if let Some((_, guards)) = self.unload_guards.remove(entry_id) {
            debug!("Running {} unload guards for entry {}", guards.len(), entry_id);
            for guard in guards {
                guard();
            }
        }
    }

    /// Remove an entry, releasing its unload guards first.
    pub async fn remove(&self, entry_id: &str) -> ConfigEntriesResult<ConfigEntry> {
        let entry = self
            .get(entry_id)
            .ok_or_else(|| ConfigEntriesError::NotFound(entry_id.to_string()))?;

        self.unload(entry_id);
        self.unindex_entry(&entry);
        self.save().await?;

        info!(
            "Removed config entry: {} ({}) [{}]",
            entry.title, entry.domain, entry_id
        );
        Ok(entry)
    }

    /// Register a cleanup guard tied to an entry's lifetime.
    pub fn on_unload(&self, entry_id: &str, guard: UnloadGuard) {
        self.unload_guards
            .entry(entry_id.to_string())
            .or_default()
            .push(guard);
    }

    /// Get count of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = ConfigEntry> + '_ {
        self.entries.iter().map(|r| r.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ConnectionConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn config(url: &str) -> ConnectionConfig {
        ConnectionConfig {
            url: url.to_string(),
            api_token: "test_api_token".to_string(),
            verify_ssl: true,
        }
    }

    fn create_test_manager() -> (TempDir, ConfigEntries) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(Storage::new(temp_dir.path()));
        let manager = ConfigEntries::new(storage);
        (temp_dir, manager)
    }

    #[tokio::test]
    async fn test_add_and_get_by_url() {
        let (_dir, manager) = create_test_manager();

        let entry = ConfigEntry::new(
            "ember_cloud",
            "https://127.0.0.1:9000/",
            config("https://127.0.0.1:9000/"),
        );
        let added = manager.add(entry).await.unwrap();

        assert_eq!(manager.len(), 1);
        let found = manager.get_by_url("https://127.0.0.1:9000/").unwrap();
        assert_eq!(found.entry_id, added.entry_id);
    }

    #[tokio::test]
    async fn test_duplicate_url_rejected() {
        let (_dir, manager) = create_test_manager();

        let url = "https://127.0.0.1:9000/";
        manager
            .add(ConfigEntry::new("ember_cloud", url, config(url)))
            .await
            .unwrap();
        let result = manager
            .add(ConfigEntry::new("ember_cloud", url, config(url)))
            .await;

        assert!(matches!(
            result,
            Err(ConfigEntriesError::AlreadyConfigured { .. })
        ));
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test]
    async fn test_update_token_in_place() {
        let (_dir, manager) = create_test_manager();

        let url = "https://127.0.0.1:9000/";
        let entry = manager
            .add(ConfigEntry::new("ember_cloud", url, config(url)))
            .await
            .unwrap();

        let updated = manager
            .update_token(&entry.entry_id, "new_api_key")
            .await
            .unwrap();

        assert_eq!(updated.entry_id, entry.entry_id);
        assert_eq!(updated.title, entry.title);
        assert_eq!(updated.url(), url);
        assert_eq!(updated.data.api_token, "new_api_key");
        assert!(updated.modified_at >= entry.modified_at);

        // Still a single record, reachable under the same key
        assert_eq!(manager.len(), 1);
        let found = manager.get_by_url(url).unwrap();
        assert_eq!(found.data.api_token, "new_api_key");
    }

    #[tokio::test]
    async fn test_unload_guards_run_once() {
        let (_dir, manager) = create_test_manager();

        let url = "https://127.0.0.1:9000/";
        let entry = manager
            .add(ConfigEntry::new("ember_cloud", url, config(url)))
            .await
            .unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let count_guard = Arc::clone(&count);
        manager.on_unload(
            &entry.entry_id,
            Box::new(move || {
                count_guard.fetch_add(1, Ordering::SeqCst);
            }),
        );

        manager.unload(&entry.entry_id);
        manager.unload(&entry.entry_id);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remove_runs_guards_and_unindexes() {
        let (_dir, manager) = create_test_manager();

        let url = "https://127.0.0.1:9000/";
        let entry = manager
            .add(ConfigEntry::new("ember_cloud", url, config(url)))
            .await
            .unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let count_guard = Arc::clone(&count);
        manager.on_unload(
            &entry.entry_id,
            Box::new(move || {
                count_guard.fetch_add(1, Ordering::SeqCst);
            }),
        );

        manager.remove(&entry.entry_id).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(manager.is_empty());
        assert!(manager.get_by_url(url).is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(Storage::new(temp_dir.path()));

        let url = "https://127.0.0.1:9000/";
        {
            let manager = ConfigEntries::new(storage.clone());
            manager
                .add(ConfigEntry::new("ember_cloud", url, config(url)))
                .await
                .unwrap();
        }

        {
            let manager = ConfigEntries::new(storage);
            manager.load().await.unwrap();

            assert_eq!(manager.len(), 1);
            let entry = manager.get_by_url(url).unwrap();
            assert_eq!(entry.title, url);
            assert_eq!(entry.data.api_token, "test_api_token");
        }
    }
}
