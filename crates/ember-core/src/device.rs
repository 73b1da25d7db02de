//! Device snapshot
//!
//! A `Device` is what the vendor cloud reports about one physical device.
//! The cloud layer owns and mutates these; integration code only reads them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{DPCode, DeviceCategory};

/// Snapshot of a vendor device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Vendor device id
    pub id: String,

    /// Vendor category code
    pub category: DeviceCategory,

    /// Display name as configured in the vendor app
    #[serde(default)]
    pub name: String,

    /// Whether the cloud currently considers the device reachable
    #[serde(default)]
    pub online: bool,

    /// Currently reported value per data-point wire id.
    ///
    /// Keyed by the raw wire string: devices routinely report data points
    /// this integration has no [`DPCode`] for.
    #[serde(default)]
    pub status: HashMap<String, serde_json::Value>,
}

impl Device {
    /// Create a device snapshot with an empty status map.
    pub fn new(id: impl Into<String>, category: DeviceCategory) -> Self {
        Self {
            id: id.into(),
            category,
            name: String::new(),
            online: true,
            status: HashMap::new(),
        }
    }

    /// Set a reported data-point value.
    pub fn with_status(mut self, code: DPCode, value: serde_json::Value) -> Self {
        self.status.insert(code.as_str().to_string(), value);
        self
    }

    /// Whether the device currently reports the given data point.
    pub fn has_dp(&self, code: DPCode) -> bool {
        self.status.contains_key(code.as_str())
    }

    /// The reported value for a data point, if present.
    pub fn dp_value(&self, code: DPCode) -> Option<&serde_json::Value> {
        self.status.get(code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_dp_follows_status() {
        let device = Device::new("bf1", DeviceCategory::Sd)
            .with_status(DPCode::ResetFilter, json!(true))
            .with_status(DPCode::CleanTime, json!(42));

        assert!(device.has_dp(DPCode::ResetFilter));
        assert!(device.has_dp(DPCode::CleanTime));
        assert!(!device.has_dp(DPCode::ResetMap));
    }

    #[test]
    fn test_duplicate_wire_id_reads_same_slot() {
        // Filter and FilterLife share the "filter" wire id, so a device
        // reporting it satisfies both lookups.
        let device =
            Device::new("bf2", DeviceCategory::Kj).with_status(DPCode::Filter, json!(80));
        assert!(device.has_dp(DPCode::Filter));
        assert!(device.has_dp(DPCode::FilterLife));
        assert_eq!(device.dp_value(DPCode::FilterLife), Some(&json!(80)));
    }

    #[test]
    fn test_deserialize_unmodeled_status_keys() {
        let device: Device = serde_json::from_str(
            r#"{
                "id": "bf3",
                "category": "sd",
                "name": "Vacuum",
                "online": true,
                "status": {"reset_filter": true, "mystery_dp": 7}
            }"#,
        )
        .unwrap();

        assert_eq!(device.category, DeviceCategory::Sd);
        assert!(device.has_dp(DPCode::ResetFilter));
        assert!(device.status.contains_key("mystery_dp"));
    }
}
