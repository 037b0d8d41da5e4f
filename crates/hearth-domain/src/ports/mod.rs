//! Domain Port Interfaces
//!
//! Contracts between the container engine and the code it manages.
//!
//! - **service** - services, their start/stop capability and typed lookups
//! - **config_slot** - fields that receive configuration values
//! - **config_source** - where a container's configuration comes from

/// Services and lookups
pub mod service;
/// Configuration slots
pub mod config_slot;
/// Configuration sources
pub mod config_source;

pub use config_slot::ConfigSlot;
pub use config_source::{ConfigurationSource, LoadedConfiguration};
pub use service::{Service, ServiceInstance, ServiceLookup, Startable};
