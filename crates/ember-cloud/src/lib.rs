//! Vendor cloud integration for the Ember hub
//!
//! Connects a hub instance to one vendor cloud account: the config flow
//! collects and validates credentials, the device manager mirrors the
//! cloud's device registry, and the entity platforms (button, switch,
//! binary sensor) bind entities to devices as discovery reports them.

pub mod binary_sensor;
pub mod button;
pub mod client;
pub mod config_flow;
pub mod error;
pub mod manager;
pub mod switch;

use std::sync::Arc;

use tracing::info;

use ember_config_entries::{ConfigEntries, ConfigEntry, ConnectionConfig};
use ember_dispatch::Dispatcher;

pub use client::{CloudApi, Endpoint, HttpCloudClient};
pub use config_flow::{Connector, SetupFlow};
pub use error::CloudError;
pub use manager::DeviceManager;

/// Integration domain
pub const DOMAIN: &str = "ember_cloud";

/// Signal sent when the cloud reports newly discovered devices. The payload
/// is the list of new device ids.
pub const DISCOVERY_NEW: &str = "ember_cloud_discovery_new";

/// The production [`Connector`]: builds an HTTP client from the settings.
pub fn http_connector() -> Connector {
    Arc::new(|config: &ConnectionConfig| {
        let client = HttpCloudClient::new(config)?;
        Ok(Arc::new(client) as Arc<dyn CloudApi>)
    })
}

/// Per-entry runtime state, created when an entry is set up.
pub struct EntryRuntime {
    pub manager: Arc<DeviceManager>,
}

/// Set up a config entry: build the cloud client and the device manager.
pub fn setup_entry(entry: &ConfigEntry) -> Result<EntryRuntime, CloudError> {
    let api = HttpCloudClient::new(&entry.data)?;
    info!(entry_id = %entry.entry_id, url = %entry.url(), "Setting up vendor cloud entry");
    Ok(EntryRuntime {
        manager: Arc::new(DeviceManager::new(Arc::new(api))),
    })
}

/// Set up the entity platforms for a loaded entry.
///
/// Each platform's discovery subscription is registered as an unload guard,
/// so tearing the entry down disconnects the platforms from the discovery
/// signal.
pub fn setup_platforms(
    entries: &ConfigEntries,
    entry: &ConfigEntry,
    runtime: &EntryRuntime,
    dispatcher: &Arc<Dispatcher<Vec<String>>>,
    add_buttons: button::AddEntities,
    add_switches: switch::AddEntities,
    add_binary_sensors: binary_sensor::AddEntities,
) {
    let button_sub = button::setup(Arc::clone(&runtime.manager), dispatcher, add_buttons);
    entries.on_unload(&entry.entry_id, Box::new(move || button_sub.unsubscribe()));

    let switch_sub = switch::setup(Arc::clone(&runtime.manager), dispatcher, add_switches);
    entries.on_unload(&entry.entry_id, Box::new(move || switch_sub.unsubscribe()));

    let binary_sensor_sub =
        binary_sensor::setup(Arc::clone(&runtime.manager), dispatcher, add_binary_sensors);
    entries.on_unload(
        &entry.entry_id,
        Box::new(move || binary_sensor_sub.unsubscribe()),
    );
}
