//! Core types for the Ember vendor-cloud integration
//!
//! This crate provides the vendor vocabulary used throughout the
//! integration: device categories, data-point codes, device snapshots,
//! and the command wire format.

mod category;
mod command;
mod device;
mod dpcode;
mod entity;

pub use category::DeviceCategory;
pub use command::Command;
pub use device::Device;
pub use dpcode::{DPCode, UnknownDPCode};
pub use entity::EntityCategory;
