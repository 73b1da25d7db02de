//! Vendor data-point codes
//!
//! Every addressable capability of a vendor device is a data point,
//! identified on the wire by a string code. The vendor API is not a model of
//! hygiene: it contains typos (`atmospheric_pressture`) and distinct named
//! codes that share one wire identifier (`filter`). Both are preserved
//! verbatim here; normalizing them would break command payloads against the
//! real cloud.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A data-point code was not recognized.
#[derive(Debug, Error)]
#[error("unknown data-point code: {0}")]
pub struct UnknownDPCode(pub String);

/// Vendor data-point code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum DPCode {
    AlarmSwitch,
    AlarmVolume,
    AtmosphericPressture, // Typo is in the vendor API
    Battery,
    BatteryPercentage,
    BatteryState,
    BrightValue,
    Ch2oValue,
    ChargeState,
    ChildLock,
    CleanArea,
    CleanTime,
    Co2Value,
    CoValue,
    Countdown,
    CountdownSet,
    CurCurrent,
    CurPower,
    CurVoltage,
    DoorcontactState,
    DusterCloth,
    EdgeBrush,
    FanSpeedEnum,
    Fault,
    FeedReport,
    /// Filter state. Shares the `filter` wire id with [`DPCode::FilterLife`].
    Filter,
    /// Filter duration in hours. The wire id is `filter_life`, which is
    /// *not* the wire id of [`DPCode::FilterLife`].
    FilterDuration,
    /// Filter life percentage. Vendor duplicate of [`DPCode::Filter`].
    FilterLife,
    FilterReset,
    GasSensorValue,
    Humidity,
    HumidityValue,
    Light,
    Lock,
    ManualFeed,
    Mode,
    MotionSwitch,
    Pause,
    PercentControl,
    Pir,
    Pm25Value,
    Power,
    PowerGo,
    PresenceState,
    PressureValue,
    Pump,
    PumpReset,
    ResetDusterCloth,
    ResetEdgeBrush,
    ResetFilter,
    ResetMap,
    ResetRollBrush,
    RollBrush,
    Sensitivity,
    Shake,
    SirenSwitch,
    SmokeSensorValue,
    Snooze,
    Sos,
    Speed,
    SprayMode,
    Start,
    Status,
    Suction,
    Switch,
    Switch1,
    Switch2,
    Switch3,
    Switch4,
    Switch5,
    Switch6,
    SwitchAlarmLight,
    SwitchAlarmSound,
    SwitchBacklight,
    SwitchCharge,
    SwitchDisturb,
    SwitchFan,
    SwitchLed,
    SwitchNightLight,
    SwitchSaveEnergy,
    SwitchSound,
    SwitchSpray,
    SwitchUsb1,
    SwitchUsb2,
    SwitchUsb3,
    SwitchUsb4,
    SwitchUsb5,
    SwitchUsb6,
    SwitchVoice,
    TempCurrent,
    TempSet,
    TempValue,
    TemperAlarm,
    TotalCleanArea,
    TotalCleanTime,
    TotalForwardEnergy,
    Tvoc,
    UvRuntime,
    VaBattery,
    VaHumidity,
    VaTemperature,
    ValveState,
    VocValue,
    WarmTime,
    Water,
    WaterReset,
    WatersensorState,
    WindowCheck,
    WorkMode,
}

impl DPCode {
    /// The vendor wire identifier for this data point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlarmSwitch => "alarm_switch",
            Self::AlarmVolume => "alarm_volume",
            Self::AtmosphericPressture => "atmospheric_pressture",
            Self::Battery => "battery",
            Self::BatteryPercentage => "battery_percentage",
            Self::BatteryState => "battery_state",
            Self::BrightValue => "bright_value",
            Self::Ch2oValue => "ch2o_value",
            Self::ChargeState => "charge_state",
            Self::ChildLock => "child_lock",
            Self::CleanArea => "clean_area",
            Self::CleanTime => "clean_time",
            Self::Co2Value => "co2_value",
            Self::CoValue => "co_value",
            Self::Countdown => "countdown",
            Self::CountdownSet => "countdown_set",
            Self::CurCurrent => "cur_current",
            Self::CurPower => "cur_power",
            Self::CurVoltage => "cur_voltage",
            Self::DoorcontactState => "doorcontact_state",
            Self::DusterCloth => "duster_cloth",
            Self::EdgeBrush => "edge_brush",
            Self::FanSpeedEnum => "fan_speed_enum",
            Self::Fault => "fault",
            Self::FeedReport => "feed_report",
            Self::Filter => "filter",
            Self::FilterDuration => "filter_life",
            Self::FilterLife => "filter",
            Self::FilterReset => "filter_reset",
            Self::GasSensorValue => "gas_sensor_value",
            Self::Humidity => "humidity",
            Self::HumidityValue => "humidity_value",
            Self::Light => "light",
            Self::Lock => "lock",
            Self::ManualFeed => "manual_feed",
            Self::Mode => "mode",
            Self::MotionSwitch => "motion_switch",
            Self::Pause => "pause",
            Self::PercentControl => "percent_control",
            Self::Pir => "pir",
            Self::Pm25Value => "pm25_value",
            Self::Power => "power",
            Self::PowerGo => "power_go",
            Self::PresenceState => "presence_state",
            Self::PressureValue => "pressure_value",
            Self::Pump => "pump",
            Self::PumpReset => "pump_reset",
            Self::ResetDusterCloth => "reset_duster_cloth",
            Self::ResetEdgeBrush => "reset_edge_brush",
            Self::ResetFilter => "reset_filter",
            Self::ResetMap => "reset_map",
            Self::ResetRollBrush => "reset_roll_brush",
            Self::RollBrush => "roll_brush",
            Self::Sensitivity => "sensitivity",
            Self::Shake => "shake",
            Self::SirenSwitch => "siren_switch",
            Self::SmokeSensorValue => "smoke_sensor_value",
            Self::Snooze => "snooze",
            Self::Sos => "sos",
            Self::Speed => "speed",
            Self::SprayMode => "spray_mode",
            Self::Start => "start",
            Self::Status => "status",
            Self::Suction => "suction",
            Self::Switch => "switch",
            Self::Switch1 => "switch_1",
            Self::Switch2 => "switch_2",
            Self::Switch3 => "switch_3",
            Self::Switch4 => "switch_4",
            Self::Switch5 => "switch_5",
            Self::Switch6 => "switch_6",
            Self::SwitchAlarmLight => "switch_alarm_light",
            Self::SwitchAlarmSound => "switch_alarm_sound",
            Self::SwitchBacklight => "switch_backlight",
            Self::SwitchCharge => "switch_charge",
            Self::SwitchDisturb => "switch_disturb",
            Self::SwitchFan => "switch_fan",
            Self::SwitchLed => "switch_led",
            Self::SwitchNightLight => "switch_night_light",
            Self::SwitchSaveEnergy => "switch_save_energy",
            Self::SwitchSound => "switch_sound",
            Self::SwitchSpray => "switch_spray",
            Self::SwitchUsb1 => "switch_usb1",
            Self::SwitchUsb2 => "switch_usb2",
            Self::SwitchUsb3 => "switch_usb3",
            Self::SwitchUsb4 => "switch_usb4",
            Self::SwitchUsb5 => "switch_usb5",
            Self::SwitchUsb6 => "switch_usb6",
            Self::SwitchVoice => "switch_voice",
            Self::TempCurrent => "temp_current",
            Self::TempSet => "temp_set",
            Self::TempValue => "temp_value",
            Self::TemperAlarm => "temper_alarm",
            Self::TotalCleanArea => "total_clean_area",
            Self::TotalCleanTime => "total_clean_time",
            Self::TotalForwardEnergy => "total_forward_energy",
            Self::Tvoc => "tvoc",
            Self::UvRuntime => "uv_runtime",
            Self::VaBattery => "va_battery",
            Self::VaHumidity => "va_humidity",
            Self::VaTemperature => "va_temperature",
            Self::ValveState => "valve_state",
            Self::VocValue => "voc_value",
            Self::WarmTime => "warm_time",
            Self::Water => "water",
            Self::WaterReset => "water_reset",
            Self::WatersensorState => "watersensor_state",
            Self::WindowCheck => "window_check",
            Self::WorkMode => "work_mode",
        }
    }
}

impl FromStr for DPCode {
    type Err = UnknownDPCode;

    /// Parse a wire identifier. Where the vendor reuses one wire id for two
    /// named codes, the first declared variant wins (`filter` parses as
    /// [`DPCode::Filter`], never [`DPCode::FilterLife`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = match s {
            "alarm_switch" => Self::AlarmSwitch,
            "alarm_volume" => Self::AlarmVolume,
            "atmospheric_pressture" => Self::AtmosphericPressture,
            "battery" => Self::Battery,
            "battery_percentage" => Self::BatteryPercentage,
            "battery_state" => Self::BatteryState,
            "bright_value" => Self::BrightValue,
            "ch2o_value" => Self::Ch2oValue,
            "charge_state" => Self::ChargeState,
            "child_lock" => Self::ChildLock,
            "clean_area" => Self::CleanArea,
            "clean_time" => Self::CleanTime,
            "co2_value" => Self::Co2Value,
            "co_value" => Self::CoValue,
            "countdown" => Self::Countdown,
            "countdown_set" => Self::CountdownSet,
            "cur_current" => Self::CurCurrent,
            "cur_power" => Self::CurPower,
            "cur_voltage" => Self::CurVoltage,
            "doorcontact_state" => Self::DoorcontactState,
            "duster_cloth" => Self::DusterCloth,
            "edge_brush" => Self::EdgeBrush,
            "fan_speed_enum" => Self::FanSpeedEnum,
            "fault" => Self::Fault,
            "feed_report" => Self::FeedReport,
            "filter" => Self::Filter,
            "filter_life" => Self::FilterDuration,
            "filter_reset" => Self::FilterReset,
            "gas_sensor_value" => Self::GasSensorValue,
            "humidity" => Self::Humidity,
            "humidity_value" => Self::HumidityValue,
            "light" => Self::Light,
            "lock" => Self::Lock,
            "manual_feed" => Self::ManualFeed,
            "mode" => Self::Mode,
            "motion_switch" => Self::MotionSwitch,
            "pause" => Self::Pause,
            "percent_control" => Self::PercentControl,
            "pir" => Self::Pir,
            "pm25_value" => Self::Pm25Value,
            "power" => Self::Power,
            "power_go" => Self::PowerGo,
            "presence_state" => Self::PresenceState,
            "pressure_value" => Self::PressureValue,
            "pump" => Self::Pump,
            "pump_reset" => Self::PumpReset,
            "reset_duster_cloth" => Self::ResetDusterCloth,
            "reset_edge_brush" => Self::ResetEdgeBrush,
            "reset_filter" => Self::ResetFilter,
            "reset_map" => Self::ResetMap,
            "reset_roll_brush" => Self::ResetRollBrush,
            "roll_brush" => Self::RollBrush,
            "sensitivity" => Self::Sensitivity,
            "shake" => Self::Shake,
            "siren_switch" => Self::SirenSwitch,
            "smoke_sensor_value" => Self::SmokeSensorValue,
            "snooze" => Self::Snooze,
            "sos" => Self::Sos,
            "speed" => Self::Speed,
            "spray_mode" => Self::SprayMode,
            "start" => Self::Start,
            "status" => Self::Status,
            "suction" => Self::Suction,
            "switch" => Self::Switch,
            "switch_1" => Self::Switch1,
            "switch_2" => Self::Switch2,
            "switch_3" => Self::Switch3,
            "switch_4" => Self::Switch4,
            "switch_5" => Self::Switch5,
            "switch_6" => Self::Switch6,
            "switch_alarm_light" => Self::SwitchAlarmLight,
            "switch_alarm_sound" => Self::SwitchAlarmSound,
            "switch_backlight" => Self::SwitchBacklight,
            "switch_charge" => Self::SwitchCharge,
            "switch_disturb" => Self::SwitchDisturb,
            "switch_fan" => Self::SwitchFan,
            "switch_led" => Self::SwitchLed,
            "switch_night_light" => Self::SwitchNightLight,
            "switch_save_energy" => Self::SwitchSaveEnergy,
            "switch_sound" => Self::SwitchSound,
            "switch_spray" => Self::SwitchSpray,
            "switch_usb1" => Self::SwitchUsb1,
            "switch_usb2" => Self::SwitchUsb2,
            "switch_usb3" => Self::SwitchUsb3,
            "switch_usb4" => Self::SwitchUsb4,
            "switch_usb5" => Self::SwitchUsb5,
            "switch_usb6" => Self::SwitchUsb6,
            "switch_voice" => Self::SwitchVoice,
            "temp_current" => Self::TempCurrent,
            "temp_set" => Self::TempSet,
            "temp_value" => Self::TempValue,
            "temper_alarm" => Self::TemperAlarm,
            "total_clean_area" => Self::TotalCleanArea,
            "total_clean_time" => Self::TotalCleanTime,
            "total_forward_energy" => Self::TotalForwardEnergy,
            "tvoc" => Self::Tvoc,
            "uv_runtime" => Self::UvRuntime,
            "va_battery" => Self::VaBattery,
            "va_humidity" => Self::VaHumidity,
            "va_temperature" => Self::VaTemperature,
            "valve_state" => Self::ValveState,
            "voc_value" => Self::VocValue,
            "warm_time" => Self::WarmTime,
            "water" => Self::Water,
            "water_reset" => Self::WaterReset,
            "watersensor_state" => Self::WatersensorState,
            "window_check" => Self::WindowCheck,
            "work_mode" => Self::WorkMode,
            other => return Err(UnknownDPCode(other.to_string())),
        };
        Ok(code)
    }
}

impl fmt::Display for DPCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DPCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DPCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip() {
        assert_eq!(DPCode::ResetFilter.as_str(), "reset_filter");
        let json = serde_json::to_string(&DPCode::SwitchUsb6).unwrap();
        assert_eq!(json, "\"switch_usb6\"");
        let parsed: DPCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DPCode::SwitchUsb6);
    }

    #[test]
    fn test_vendor_duplicate_wire_ids_preserved() {
        // Two named codes, one wire id. The vendor ships it this way.
        assert_eq!(DPCode::Filter.as_str(), DPCode::FilterLife.as_str());
        assert_ne!(DPCode::Filter, DPCode::FilterLife);

        // And filter_life belongs to a third code entirely.
        assert_eq!(DPCode::FilterDuration.as_str(), "filter_life");

        // Parsing the shared id resolves to the first declared variant.
        assert_eq!("filter".parse::<DPCode>().unwrap(), DPCode::Filter);
    }

    #[test]
    fn test_vendor_typo_preserved() {
        assert_eq!(
            DPCode::AtmosphericPressture.as_str(),
            "atmospheric_pressture"
        );
    }

    #[test]
    fn test_unknown_code() {
        let err = "definitely_not_a_dp".parse::<DPCode>().unwrap_err();
        assert!(err.to_string().contains("definitely_not_a_dp"));
    }
}
