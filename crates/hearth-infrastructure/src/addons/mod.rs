//! Built-in addons
//!
//! Registered under the `hearth::addons` namespace, so every container
//! using the link-time registry loads them.

pub mod inventory;

pub use inventory::InventoryAddon;
