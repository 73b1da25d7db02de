//! Switch platform
//!
//! Switches mirror boolean data points: `is_on` reads the reported value
//! from the device registry, turn on/off writes `true`/`false` back through
//! the cloud. Binding follows the same per-category tables as buttons.

use std::sync::Arc;

use tracing::debug;

use ember_core::{Command, DPCode, Device, DeviceCategory, EntityCategory};
use ember_dispatch::{Dispatcher, Subscription};

use crate::error::CloudError;
use crate::manager::DeviceManager;
use crate::{DISCOVERY_NEW, DOMAIN};

/// Describes one switch a device category may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchDescription {
    /// Boolean data point the switch mirrors
    pub key: DPCode,
    /// Stable key for localized naming
    pub translation_key: &'static str,
    pub entity_category: Option<EntityCategory>,
}

const fn switch(key: DPCode, translation_key: &'static str) -> SwitchDescription {
    SwitchDescription {
        key,
        translation_key,
        entity_category: None,
    }
}

const fn config_switch(key: DPCode, translation_key: &'static str) -> SwitchDescription {
    SwitchDescription {
        key,
        translation_key,
        entity_category: Some(EntityCategory::Config),
    }
}

/// Smart kettle (`bh`)
const KETTLE_SWITCHES: &[SwitchDescription] = &[switch(DPCode::Start, "start")];

/// White noise machine (`bzyd`)
const WHITE_NOISE_SWITCHES: &[SwitchDescription] = &[
    switch(DPCode::Switch, "switch"),
    config_switch(DPCode::ChildLock, "child_lock"),
    config_switch(DPCode::Snooze, "snooze"),
];

/// Dehumidifier (`cs`)
const DEHUMIDIFIER_SWITCHES: &[SwitchDescription] = &[
    config_switch(DPCode::ChildLock, "child_lock"),
    config_switch(DPCode::FilterReset, "filter_reset"),
];

/// Smart odor eliminator (`cwjwq`)
const ODOR_ELIMINATOR_SWITCHES: &[SwitchDescription] = &[switch(DPCode::Switch, "switch")];

/// Pet fountain (`cwysj`)
const PET_FOUNTAIN_SWITCHES: &[SwitchDescription] = &[
    config_switch(DPCode::FilterReset, "filter_reset"),
    config_switch(DPCode::PumpReset, "pump_reset"),
    switch(DPCode::Switch, "power"),
    config_switch(DPCode::WaterReset, "water_reset"),
];

/// Circuit breaker (`dlq`)
const CIRCUIT_BREAKER_SWITCHES: &[SwitchDescription] = &[
    config_switch(DPCode::ChildLock, "child_lock"),
    switch(DPCode::Switch, "switch"),
];

/// Switch (`kg`): up to six gangs
const SWITCH_SWITCHES: &[SwitchDescription] = &[
    switch(DPCode::Switch1, "switch_1"),
    switch(DPCode::Switch2, "switch_2"),
    switch(DPCode::Switch3, "switch_3"),
    switch(DPCode::Switch4, "switch_4"),
    switch(DPCode::Switch5, "switch_5"),
    switch(DPCode::Switch6, "switch_6"),
    config_switch(DPCode::ChildLock, "child_lock"),
];

/// Air purifier (`kj`)
const AIR_PURIFIER_SWITCHES: &[SwitchDescription] = &[
    config_switch(DPCode::ChildLock, "child_lock"),
    config_switch(DPCode::FilterReset, "filter_reset"),
    switch(DPCode::Switch, "switch"),
];

/// Power strip (`pc`): four gangs
const POWER_STRIP_SWITCHES: &[SwitchDescription] = &[
    switch(DPCode::Switch1, "switch_1"),
    switch(DPCode::Switch2, "switch_2"),
    switch(DPCode::Switch3, "switch_3"),
    switch(DPCode::Switch4, "switch_4"),
    config_switch(DPCode::ChildLock, "child_lock"),
];

/// Heater (`qn`)
const HEATER_SWITCHES: &[SwitchDescription] = &[config_switch(DPCode::ChildLock, "child_lock")];

/// Robot vacuum (`sd`)
const ROBOT_VACUUM_SWITCHES: &[SwitchDescription] =
    &[config_switch(DPCode::SwitchDisturb, "do_not_disturb")];

/// Thermostat (`wk`)
const THERMOSTAT_SWITCHES: &[SwitchDescription] =
    &[config_switch(DPCode::ChildLock, "child_lock")];

/// Diffuser (`xxj`)
const DIFFUSER_SWITCHES: &[SwitchDescription] = &[
    switch(DPCode::Switch, "power"),
    switch(DPCode::SwitchSpray, "spray"),
    config_switch(DPCode::SwitchVoice, "voice"),
];

/// Switch table for a device category. Categories without switches map to
/// the empty slice.
pub fn descriptions(category: DeviceCategory) -> &'static [SwitchDescription] {
    match category {
        DeviceCategory::Bh => KETTLE_SWITCHES,
        DeviceCategory::Bzyd => WHITE_NOISE_SWITCHES,
        DeviceCategory::Cs => DEHUMIDIFIER_SWITCHES,
        DeviceCategory::Cwjwq => ODOR_ELIMINATOR_SWITCHES,
        DeviceCategory::Cwysj => PET_FOUNTAIN_SWITCHES,
        DeviceCategory::Dlq => CIRCUIT_BREAKER_SWITCHES,
        DeviceCategory::Kg => SWITCH_SWITCHES,
        DeviceCategory::Kj => AIR_PURIFIER_SWITCHES,
        DeviceCategory::Pc => POWER_STRIP_SWITCHES,
        DeviceCategory::Qn => HEATER_SWITCHES,
        DeviceCategory::Sd => ROBOT_VACUUM_SWITCHES,
        DeviceCategory::Wk => THERMOSTAT_SWITCHES,
        DeviceCategory::Xxj => DIFFUSER_SWITCHES,
        _ => &[],
    }
}

/// A bound switch entity.
pub struct SwitchEntity {
    device_id: String,
    unique_id: String,
    manager: Arc<DeviceManager>,
    description: &'static SwitchDescription,
}

impl SwitchEntity {
    fn new(
        device: &Device,
        manager: Arc<DeviceManager>,
        description: &'static SwitchDescription,
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
    /// non-boolean report reads as off.
    pub fn is_on(&self) -> bool {
        self.manager
            .device(&self.device_id)
            .and_then(|device| {
                device
                    .dp_value(self.description.key)
                    .and_then(|value| value.as_bool())
            })
            .unwrap_or(false)
    }

    pub async fn turn_on(&self) -> Result<(), CloudError> {
        self.send(true).await
    }

    pub async fn turn_off(&self) -> Result<(), CloudError> {
        self.send(false).await
    }

    async fn send(&self, value: bool) -> Result<(), CloudError> {
        self.manager
            .send_commands(
                &self.device_id,
                vec![Command::bool(self.description.key, value)],
            )
            .await
    }
}

/// Callback handing freshly bound entities to the hub.
pub type AddEntities = Arc<dyn Fn(Vec<SwitchEntity>) + Send + Sync>;

/// Set up the switch platform for a config entry.
///
/// Same shape as the button platform: an eager pass over known devices,
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
                        entities.push(SwitchEntity::new(&device, Arc::clone(&manager), description));
                    }
                }
            }
            debug!(count = entities.len(), "Adding switch entities");
            add_entities(entities);
        }
    };

    discover(manager.device_ids().as_slice());
    dispatcher.connect(DISCOVERY_NEW, move |ids: &Vec<String>| {
        discover(ids.as_slice())
    })
}
