//! Binary sensor platform
//!
//! Read-only boolean states reported by the device: contact, motion, leak,
//! tamper. No command path; `is_on` compares the reported value against the
//! descriptor's on-value, which for many vendor sensors is a string such as
//! `"alarm"` rather than a boolean.

use std::sync::Arc;

use tracing::debug;

use ember_core::{DPCode, Device, DeviceCategory, EntityCategory};
use ember_dispatch::{Dispatcher, Subscription};

use crate::manager::DeviceManager;
use crate::{DISCOVERY_NEW, DOMAIN};

/// Reported value that reads as "on".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnValue {
    Bool(bool),
    Str(&'static str),
}

impl OnValue {
    fn matches(&self, reported: &serde_json::Value) -> bool {
        match self {
            Self::Bool(expected) => reported.as_bool() == Some(*expected),
            Self::Str(expected) => reported.as_str() == Some(*expected),
        }
    }
}

/// Describes one binary sensor a device category may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarySensorDescription {
    /// Data point the sensor reads
    pub key: DPCode,
    /// Stable key for localized naming
    pub translation_key: &'static str,
    pub entity_category: Option<EntityCategory>,
    /// Reported value meaning "on"
    pub on_value: OnValue,
}

/// Tamper alarm, shared by several sensor categories.
const TAMPER_BINARY_SENSOR: BinarySensorDescription = BinarySensorDescription {
    key: DPCode::TemperAlarm,
    translation_key: "tamper",
    entity_category: Some(EntityCategory::Diagnostic),
    on_value: OnValue::Bool(true),
};

/// Contact sensor (`mcs`)
const CONTACT_SENSOR_BINARY_SENSORS: &[BinarySensorDescription] = &[
    BinarySensorDescription {
        key: DPCode::DoorcontactState,
        translation_key: "door",
        entity_category: None,
        on_value: OnValue::Bool(true),
    },
    TAMPER_BINARY_SENSOR,
];

/// Human motion sensor (`pir`)
const MOTION_SENSOR_BINARY_SENSORS: &[BinarySensorDescription] = &[
    BinarySensorDescription {
        key: DPCode::Pir,
        translation_key: "motion",
        entity_category: None,
        on_value: OnValue::Str("pir"),
    },
    TAMPER_BINARY_SENSOR,
];

/// Human presence sensor (`hps`)
const PRESENCE_SENSOR_BINARY_SENSORS: &[BinarySensorDescription] = &[BinarySensorDescription {
    key: DPCode::PresenceState,
    translation_key: "presence",
    entity_category: None,
    on_value: OnValue::Str("presence"),
}];

/// Water leak detector (`sj`)
const WATER_LEAK_BINARY_SENSORS: &[BinarySensorDescription] = &[
    BinarySensorDescription {
        key: DPCode::WatersensorState,
        translation_key: "moisture",
        entity_category: None,
        on_value: OnValue::Str("alarm"),
    },
    TAMPER_BINARY_SENSOR,
];

/// Binary sensor table for a device category. Categories without binary
/// sensors map to the empty slice.
pub fn descriptions(category: DeviceCategory) -> &'static [BinarySensorDescription] {
    match category {
        DeviceCategory::Hps => PRESENCE_SENSOR_BINARY_SENSORS,
        DeviceCategory::Mcs => CONTACT_SENSOR_BINARY_SENSORS,
        DeviceCategory::Pir => MOTION_SENSOR_BINARY_SENSORS,
        DeviceCategory::Sj => WATER_LEAK_BINARY_SENSORS,
        _ => &[],
    }
}

/// A bound binary sensor entity. Read-only: no command path.
pub struct BinarySensorEntity {
    device_id: String,
    unique_id: String,
    manager: Arc<DeviceManager>,
    description: &'static BinarySensorDescription,
}

impl BinarySensorEntity {
    fn new(
        device: &Device,
        manager: Arc<DeviceManager>,
        description: &'static BinarySensorDescription,
    ) -> Self {
        Self {
            unique_id: format!("{DOMAIN}.{}{}", device.id, description.key),
            device_id: device.id.clone(),
            manager,
            description,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn translation_key(&self) -> &'static str {
        self.description.translation_key
    }

    pub fn entity_category(&self) -> Option<EntityCategory> {
        self.description.entity_category
    }

    /// Current state, read from the device registry. A missing device or a
    /// report that does not match the on-value reads as off.
    pub fn is_on(&self) -> bool {
        self.manager
            .device(&self.device_id)
            .and_then(|device| {
                device
                    .dp_value(self.description.key)
                    .map(|value| self.description.on_value.matches(value))
            })
            .unwrap_or(false)
    }
}

/// Callback handing freshly bound entities to the hub.
pub type AddEntities = Arc<dyn Fn(Vec<BinarySensorEntity>) + Send + Sync>;

/// Set up the binary sensor platform for a config entry.
///
/// Same shape as the other platforms: an eager pass over known devices,
/// then a discovery subscription for devices that appear later.
pub fn setup(
    manager: Arc<DeviceManager>,
    dispatcher: &Arc<Dispatcher<Vec<String>>>,
    add_entities: AddEntities,
) -> Subscription<Vec<String>> {
    let discover = {
        let manager = Arc::clone(&manager);
        move |device_ids: &[String]| {
            let mut entities = Vec::new();
            for device_id in device_ids {
                let Some(device) = manager.device(device_id) else {
                    continue;
                };
                for description in descriptions(device.category) {
                    if device.has_dp(description.key) {
                        entities.push(BinarySensorEntity::new(
                            &device,
                            Arc::clone(&manager),
                            description,
                        ));
                    }
                }
            }
            debug!(count = entities.len(), "Adding binary sensor entities");
            add_entities(entities);
        }
    };

    discover(manager.device_ids().as_slice());
    dispatcher.connect(DISCOVERY_NEW, move |ids: &Vec<String>| {
        discover(ids.as_slice())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    use ember_core::Command;

    use crate::client::{CloudApi, Endpoint};
    use crate::error::CloudError;

    struct NullApi;

    #[async_trait]
    impl CloudApi for NullApi {
        async fn list_endpoints(&self) -> Result<Vec<Endpoint>, CloudError> {
            Ok(Vec::new())
        }

        async fn send_commands(
            &self,
            _device_id: &str,
            _commands: &[Command],
        ) -> Result<(), CloudError> {
            Ok(())
        }
    }

    fn collector() -> (AddEntities, Arc<Mutex<Vec<BinarySensorEntity>>>) {
        let added = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&added);
        let add: AddEntities = Arc::new(move |entities| {
            sink.lock().unwrap().extend(entities);
        });
        (add, added)
    }

    #[tokio::test]
    async fn test_boolean_on_value() {
        let manager = Arc::new(DeviceManager::new(Arc::new(NullApi)));
        manager.insert_device(
            Device::new("door1", DeviceCategory::Mcs)
                .with_status(DPCode::DoorcontactState, json!(true)),
        );

        let dispatcher = Arc::new(Dispatcher::new());
        let (add, added) = collector();
        let _sub = setup(Arc::clone(&manager), &dispatcher, add);

        let added = added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].translation_key(), "door");
        assert!(added[0].is_on());

        manager.insert_device(
            Device::new("door1", DeviceCategory::Mcs)
                .with_status(DPCode::DoorcontactState, json!(false)),
        );
        assert!(!added[0].is_on());
    }

    #[tokio::test]
    async fn test_string_on_value() {
        let manager = Arc::new(DeviceManager::new(Arc::new(NullApi)));
        manager.insert_device(
            Device::new("leak1", DeviceCategory::Sj)
                .with_status(DPCode::WatersensorState, json!("alarm")),
        );

        let dispatcher = Arc::new(Dispatcher::new());
        let (add, added) = collector();
        let _sub = setup(Arc::clone(&manager), &dispatcher, add);

        let added = added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert!(added[0].is_on());

        manager.insert_device(
            Device::new("leak1", DeviceCategory::Sj)
                .with_status(DPCode::WatersensorState, json!("normal")),
        );
        assert!(!added[0].is_on());
    }

    #[tokio::test]
    async fn test_tamper_is_diagnostic() {
        let manager = Arc::new(DeviceManager::new(Arc::new(NullApi)));
        manager.insert_device(
            Device::new("pir1", DeviceCategory::Pir)
                .with_status(DPCode::Pir, json!("none"))
                .with_status(DPCode::TemperAlarm, json!(true)),
        );

        let dispatcher = Arc::new(Dispatcher::new());
        let (add, added) = collector();
        let _sub = setup(manager, &dispatcher, add);

        let added = added.lock().unwrap();
        let tamper = added
            .iter()
            .find(|e| e.translation_key() == "tamper")
            .unwrap();
        let motion = added
            .iter()
            .find(|e| e.translation_key() == "motion")
            .unwrap();
        assert_eq!(tamper.entity_category(), Some(EntityCategory::Diagnostic));
        assert!(tamper.is_on());
        assert!(!motion.is_on());
    }

    #[tokio::test]
    async fn test_category_without_binary_sensors_binds_nothing() {
        let manager = Arc::new(DeviceManager::new(Arc::new(NullApi)));
        manager.insert_device(
            Device::new("kettle1", DeviceCategory::Bh).with_status(DPCode::Start, json!(false)),
        );

        let dispatcher = Arc::new(Dispatcher::new());
        let (add, added) = collector();
        let _sub = setup(manager, &dispatcher, add);

        assert!(added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_discovery_signal_binds_new_devices() {
        let manager = Arc::new(DeviceManager::new(Arc::new(NullApi)));
        let dispatcher = Arc::new(Dispatcher::new());
        let (add, added) = collector();
        let _sub = setup(Arc::clone(&manager), &dispatcher, add);

        manager.insert_device(
            Device::new("hps1", DeviceCategory::Hps)
                .with_status(DPCode::PresenceState, json!("presence")),
        );
        dispatcher.send(DISCOVERY_NEW, &vec!["hps1".to_string()]);

        let added = added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert!(added[0].is_on());
    }
}
