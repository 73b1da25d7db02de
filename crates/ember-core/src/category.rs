//! Vendor device categories
//!
//! The vendor classifies every physical device with a short category code
//! that determines which data points it may expose. The codes below are the
//! vendor's wire identifiers, including several that only appear in shipped
//! firmware and never made the official documentation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vendor device category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceCategory {
    /// Smart kettle
    #[serde(rename = "bh")]
    Bh,
    /// Scene switch
    #[serde(rename = "cjkg")]
    Cjkg,
    /// Garage door opener
    #[serde(rename = "ckmkzq")]
    Ckmkzq,
    /// Curtain
    #[serde(rename = "cl")]
    Cl,
    /// Curtain switch
    #[serde(rename = "clkg")]
    Clkg,
    /// CO2 detector
    #[serde(rename = "co2bj")]
    Co2bj,
    /// CO detector
    #[serde(rename = "cobj")]
    Cobj,
    /// Dehumidifier
    #[serde(rename = "cs")]
    Cs,
    /// Pet feeder
    #[serde(rename = "cwwsq")]
    Cwwsq,
    /// Pet fountain
    #[serde(rename = "cwysj")]
    Cwysj,
    /// Socket
    #[serde(rename = "cz")]
    Cz,
    /// Multi-functional alarm
    #[serde(rename = "dgnbj")]
    Dgnbj,
    /// Light
    #[serde(rename = "dj")]
    Dj,
    /// Circuit breaker
    #[serde(rename = "dlq")]
    Dlq,
    /// Fan
    #[serde(rename = "fs")]
    Fs,
    /// Irrigator
    #[serde(rename = "ggq")]
    Ggq,
    /// Human presence sensor
    #[serde(rename = "hps")]
    Hps,
    /// Humidifier
    #[serde(rename = "jsq")]
    Jsq,
    /// Switch
    #[serde(rename = "kg")]
    Kg,
    /// Air purifier
    #[serde(rename = "kj")]
    Kj,
    /// Air conditioner
    #[serde(rename = "kt")]
    Kt,
    /// Luminance sensor
    #[serde(rename = "ldcg")]
    Ldcg,
    /// Alarm host
    #[serde(rename = "mal")]
    Mal,
    /// Contact sensor
    #[serde(rename = "mcs")]
    Mcs,
    /// Cat toilet
    #[serde(rename = "msp")]
    Msp,
    /// Power strip
    #[serde(rename = "pc")]
    Pc,
    /// Human motion sensor
    #[serde(rename = "pir")]
    Pir,
    /// PM2.5 detector
    #[serde(rename = "pm2.5")]
    Pm25,
    /// Heater
    #[serde(rename = "qn")]
    Qn,
    /// Gas alarm
    #[serde(rename = "rqbj")]
    Rqbj,
    /// Robot vacuum
    #[serde(rename = "sd")]
    Sd,
    /// Siren alarm
    #[serde(rename = "sgbj")]
    Sgbj,
    /// Water leak detector
    #[serde(rename = "sj")]
    Sj,
    /// Emergency button
    #[serde(rename = "sos")]
    Sos,
    /// Smart camera
    #[serde(rename = "sp")]
    Sp,
    /// Dimmer switch
    #[serde(rename = "tgkg")]
    Tgkg,
    /// Thermostat
    #[serde(rename = "wk")]
    Wk,
    /// Temperature and humidity sensor
    #[serde(rename = "wsdcg")]
    Wsdcg,
    /// Ceiling light
    #[serde(rename = "xdd")]
    Xdd,
    /// Diffuser
    #[serde(rename = "xxj")]
    Xxj,
    /// Smoke alarm
    #[serde(rename = "ywbj")]
    Ywbj,
    /// Vibration sensor
    #[serde(rename = "zd")]
    Zd,
    /// Smart electricity meter
    #[serde(rename = "zndb")]
    Zndb,

    // Shipped by the vendor but absent from the official category list.
    /// White noise machine (undocumented)
    #[serde(rename = "bzyd")]
    Bzyd,
    /// Smart odor eliminator (undocumented)
    #[serde(rename = "cwjwq")]
    Cwjwq,
    /// Wake-up light (undocumented)
    #[serde(rename = "hxd")]
    Hxd,
    /// AC charging pile (undocumented)
    #[serde(rename = "qccdz")]
    Qccdz,
    /// Fingerbot (undocumented)
    #[serde(rename = "szjqr")]
    Szjqr,
    /// Dimmer (undocumented)
    #[serde(rename = "tdq")]
    Tdq,
    /// Thermostatic radiator valve (undocumented)
    #[serde(rename = "wkf")]
    Wkf,
    /// Smart WiFi IR remote (undocumented)
    #[serde(rename = "wnykq")]
    Wnykq,
    /// Wireless switch
    #[serde(rename = "wxkg")]
    Wxkg,
    /// Tank level sensor (undocumented)
    #[serde(rename = "ywcgq")]
    Ywcgq,
    /// Soil sensor (undocumented)
    #[serde(rename = "zwjcy")]
    Zwjcy,

    /// Category code this integration has no table for yet. Devices in
    /// unmodeled categories are kept in the registry but bind no entities.
    #[serde(other)]
    Unmodeled,
}

impl DeviceCategory {
    /// The vendor wire identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bh => "bh",
            Self::Cjkg => "cjkg",
            Self::Ckmkzq => "ckmkzq",
            Self::Cl => "cl",
            Self::Clkg => "clkg",
            Self::Co2bj => "co2bj",
            Self::Cobj => "cobj",
            Self::Cs => "cs",
            Self::Cwwsq => "cwwsq",
            Self::Cwysj => "cwysj",
            Self::Cz => "cz",
            Self::Dgnbj => "dgnbj",
            Self::Dj => "dj",
            Self::Dlq => "dlq",
            Self::Fs => "fs",
            Self::Ggq => "ggq",
            Self::Hps => "hps",
            Self::Jsq => "jsq",
            Self::Kg => "kg",
            Self::Kj => "kj",
            Self::Kt => "kt",
            Self::Ldcg => "ldcg",
            Self::Mal => "mal",
            Self::Mcs => "mcs",
            Self::Msp => "msp",
            Self::Pc => "pc",
            Self::Pir => "pir",
            Self::Pm25 => "pm2.5",
            Self::Qn => "qn",
            Self::Rqbj => "rqbj",
            Self::Sd => "sd",
            Self::Sgbj => "sgbj",
            Self::Sj => "sj",
            Self::Sos => "sos",
            Self::Sp => "sp",
            Self::Tgkg => "tgkg",
            Self::Wk => "wk",
            Self::Wsdcg => "wsdcg",
            Self::Xdd => "xdd",
            Self::Xxj => "xxj",
            Self::Ywbj => "ywbj",
            Self::Zd => "zd",
            Self::Zndb => "zndb",
            Self::Bzyd => "bzyd",
            Self::Cwjwq => "cwjwq",
            Self::Hxd => "hxd",
            Self::Qccdz => "qccdz",
            Self::Szjqr => "szjqr",
            Self::Tdq => "tdq",
            Self::Wkf => "wkf",
            Self::Wnykq => "wnykq",
            Self::Wxkg => "wxkg",
            Self::Ywcgq => "ywcgq",
            Self::Zwjcy => "zwjcy",
            Self::Unmodeled => "unmodeled",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip() {
        let json = serde_json::to_string(&DeviceCategory::Sd).unwrap();
        assert_eq!(json, "\"sd\"");

        let parsed: DeviceCategory = serde_json::from_str("\"hxd\"").unwrap();
        assert_eq!(parsed, DeviceCategory::Hxd);
    }

    #[test]
    fn test_unknown_code_is_unmodeled() {
        let parsed: DeviceCategory = serde_json::from_str("\"nope\"").unwrap();
        assert_eq!(parsed, DeviceCategory::Unmodeled);
    }

    #[test]
    fn test_dotted_category_code() {
        // The PM2.5 detector is the one category with a dot in its code
        let parsed: DeviceCategory = serde_json::from_str("\"pm2.5\"").unwrap();
        assert_eq!(parsed, DeviceCategory::Pm25);
        assert_eq!(parsed.as_str(), "pm2.5");
    }
}
