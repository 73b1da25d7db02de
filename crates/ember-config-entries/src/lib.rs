//! Config Entries
//!
//! This crate provides the configuration record store for the Ember hub.
//! A config entry holds one integration instance's connection settings,
//! uniquely keyed by the connection URL, persisted as a versioned JSON
//! storage file.
//!
//! # Key Types
//!
//! - [`ConfigEntry`] - one persisted connection configuration
//! - [`ConfigEntries`] - manager for all config entries
//! - [`FlowResult`] - step results returned by setup/reauth flows

pub mod entry;
pub mod flow;
pub mod manager;
pub mod storage;

pub use entry::{ConfigEntry, ConnectionConfig};
pub use flow::{
    FlowResult, FlowStep, ABORT_ALREADY_CONFIGURED, ABORT_REAUTH_SUCCESSFUL, ERROR_BASE,
};
pub use manager::{
    ConfigEntries, ConfigEntriesData, ConfigEntriesError, ConfigEntriesResult, UnloadGuard,
    STORAGE_KEY, STORAGE_MINOR_VERSION, STORAGE_VERSION,
};
pub use storage::{Storage, StorageError, StorageFile, StorageResult};
