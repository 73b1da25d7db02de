//! Entity classification tags

use serde::{Deserialize, Serialize};

/// Classification of an entity relative to its device.
///
/// Entities without a category are primary controls; `Config` and
/// `Diagnostic` entities are tucked away in secondary UI sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// Configuration control (e.g. consumable reset)
    Config,
    /// Read-only diagnostic
    Diagnostic,
}
