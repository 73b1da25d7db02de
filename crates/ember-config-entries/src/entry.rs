//! Config Entry types
//!
//! A `ConfigEntry` represents one configured connection to a vendor cloud.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connection settings collected by the setup flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the vendor cloud endpoint
    pub url: String,

    /// API credential token
    pub api_token: String,

    /// Whether to verify the TLS certificate of the endpoint
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

fn default_verify_ssl() -> bool {
    true
}

/// A persisted configuration entry.
///
/// The connection URL is the uniqueness key: the store never holds two
/// entries for the same URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Unique identifier (ULID)
    pub entry_id: String,

    /// Integration domain (e.g. "ember_cloud")
    pub domain: String,

    /// Human-readable display name
    pub title: String,

    /// Connection configuration
    pub data: ConnectionConfig,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    #[serde(default = "Utc::now")]
    pub modified_at: DateTime<Utc>,
}

impl ConfigEntry {
    /// Create a new config entry.
    pub fn new(
        domain: impl Into<String>,
        title: impl Into<String>,
        data: ConnectionConfig,
    ) -> Self {
        let now = Utc::now();
        Self {
            entry_id: ulid::Ulid::new().to_string(),
            domain: domain.into(),
            title: title.into(),
            data,
            created_at: now,
            modified_at: now,
        }
    }

    /// The uniqueness key of this entry.
    pub fn url(&self) -> &str {
        &self.data.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            url: "https://127.0.0.1:9000/".to_string(),
            api_token: "token".to_string(),
            verify_ssl: true,
        }
    }

    #[test]
    fn test_new_entry() {
        let entry = ConfigEntry::new("ember_cloud", "https://127.0.0.1:9000/", config());
        assert_eq!(entry.domain, "ember_cloud");
        assert_eq!(entry.title, "https://127.0.0.1:9000/");
        assert_eq!(entry.url(), "https://127.0.0.1:9000/");
        assert!(!entry.entry_id.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let entry = ConfigEntry::new("ember_cloud", "My Cloud", config());
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: ConfigEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.entry_id, entry.entry_id);
        assert_eq!(parsed.data, entry.data);
    }

    #[test]
    fn test_verify_ssl_defaults_true() {
        let parsed: ConnectionConfig =
            serde_json::from_str(r#"{"url": "https://h/", "api_token": "t"}"#).unwrap();
        assert!(parsed.verify_ssl);
    }
}
