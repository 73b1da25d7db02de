//! Device manager
//!
//! Holds the live device registry reported by the vendor cloud and the
//! command channel entities use to act on devices. The cloud layer mutates
//! the registry; entity platforms only read snapshots from it.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use ember_core::{Command, Device};

use crate::client::CloudApi;
use crate::error::CloudError;

/// Live device registry plus command channel.
pub struct DeviceManager {
    api: Arc<dyn CloudApi>,
    devices: DashMap<String, Device>,
}

impl DeviceManager {
    pub fn new(api: Arc<dyn CloudApi>) -> Self {
        Self {
            api,
            devices: DashMap::new(),
        }
    }

    /// Insert or replace a device snapshot.
    pub fn insert_device(&self, device: Device) {
        debug!(device_id = %device.id, category = %device.category, "Updating device snapshot");
        self.devices.insert(device.id.clone(), device);
    }

    /// Current snapshot of a device, if known.
    pub fn device(&self, device_id: &str) -> Option<Device> {
        self.devices.get(device_id).map(|r| r.value().clone())
    }

    /// Ids of all currently known devices.
    pub fn device_ids(&self) -> Vec<String> {
        self.devices.iter().map(|r| r.key().clone()).collect()
    }

    /// Number of known devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Check if no devices are known.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Send a command batch to a device through the vendor cloud.
    pub async fn send_commands(
        &self,
        device_id: &str,
        commands: Vec<Command>,
    ) -> Result<(), CloudError> {
        debug!(device_id, ?commands, "Sending commands");
        self.api.send_commands(device_id, &commands).await
    }
}
