//! Command wire format
//!
//! Commands are sent to the vendor cloud as a list of `{code, value}`
//! objects addressed to one device.

use serde::{Deserialize, Serialize};

use crate::DPCode;

/// A single data-point command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Data-point wire code
    pub code: DPCode,
    /// Value to set
    pub value: serde_json::Value,
}

impl Command {
    pub fn new(code: DPCode, value: serde_json::Value) -> Self {
        Self { code, value }
    }

    /// A boolean command, the most common case (switches, buttons).
    pub fn bool(code: DPCode, value: bool) -> Self {
        Self::new(code, serde_json::Value::Bool(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let cmd = Command::bool(DPCode::ResetFilter, true);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "reset_filter", "value": true})
        );
    }
}
