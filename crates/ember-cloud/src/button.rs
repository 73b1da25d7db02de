//! Button platform
//!
//! Buttons are momentary data points: pressing one sends `true` to the
//! device and holds no state. Which buttons a device gets is decided by a
//! static per-category table, filtered down to the data points the device
//! actually reports.

use std::sync::Arc;

use tracing::debug;

use ember_core::{Command, DPCode, Device, DeviceCategory, EntityCategory};
use ember_dispatch::{Dispatcher, Subscription};

use crate::error::CloudError;
use crate::manager::DeviceManager;
use crate::{DISCOVERY_NEW, DOMAIN};

/// Describes one button a device category may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonDescription {
    /// Data point the button writes to
    pub key: DPCode,
    /// Stable key for localized naming
    pub translation_key: &'static str,
    pub entity_category: Option<EntityCategory>,
}

/// Wake-up light (`hxd`)
const WAKE_UP_LIGHT_BUTTONS: &[ButtonDescription] = &[ButtonDescription {
    key: DPCode::SwitchUsb6,
    translation_key: "snooze",
    entity_category: None,
}];

/// Robot vacuum (`sd`): consumable and map resets
const ROBOT_VACUUM_BUTTONS: &[ButtonDescription] = &[
    ButtonDescription {
        key: DPCode::ResetDusterCloth,
        translation_key: "reset_duster_cloth",
        entity_category: Some(EntityCategory::Config),
    },
    ButtonDescription {
        key: DPCode::ResetEdgeBrush,
        translation_key: "reset_edge_brush",
        entity_category: Some(EntityCategory::Config),
    },
    ButtonDescription {
        key: DPCode::ResetFilter,
        translation_key: "reset_filter",
        entity_category: Some(EntityCategory::Config),
    },
    ButtonDescription {
        key: DPCode::ResetMap,
        translation_key: "reset_map",
        entity_category: Some(EntityCategory::Config),
    },
    ButtonDescription {
        key: DPCode::ResetRollBrush,
        translation_key: "reset_roll_brush",
        entity_category: Some(EntityCategory::Config),
    },
];

/// Button table for a device category. Categories without buttons map to
/// the empty slice.
pub fn descriptions(category: DeviceCategory) -> &'static [ButtonDescription] {
    match category {
        DeviceCategory::Hxd => WAKE_UP_LIGHT_BUTTONS,
        DeviceCategory::Sd => ROBOT_VACUUM_BUTTONS,
        _ => &[],
    }
}

/// A bound button entity.
pub struct ButtonEntity {
    device_id: String,
    unique_id: String,
    manager: Arc<DeviceManager>,
    description: &'static ButtonDescription,
}

impl ButtonEntity {
    fn new(
        device: &Device,
        manager: Arc<DeviceManager>,
        description: &'static ButtonDescription,
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

    /// Press the button: send `true` to the underlying data point.
    pub async fn press(&self) -> Result<(), CloudError> {
        self.manager
            .send_commands(
                &self.device_id,
                vec![Command::bool(self.description.key, true)],
            )
            .await
    }
}

/// Callback handing freshly bound entities to the hub.
pub type AddEntities = Arc<dyn Fn(Vec<ButtonEntity>) + Send + Sync>;

/// Set up the button platform for a config entry.
///
/// Binds buttons for every device already known to the manager, then stays
/// connected to the discovery signal to bind buttons for devices that appear
/// later. The platform stays live until the returned [`Subscription`] is
/// released.
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
                        entities.push(ButtonEntity::new(&device, Arc::clone(&manager), description));
                    }
                }
            }
            debug!(count = entities.len(), "Adding button entities");
            add_entities(entities);
        }
    };

    discover(manager.device_ids().as_slice());
    dispatcher.connect(DISCOVERY_NEW, move |ids: &Vec<String>| {
        discover(ids.as_slice())
    })
}
