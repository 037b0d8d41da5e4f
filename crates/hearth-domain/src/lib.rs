//! Domain Layer - Hearth
//!
//! Types every other layer speaks: the error taxonomy, configuration values
//! and the store that holds them, lifecycle states, and the ports services
//! implement.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | `Error`, `ErrorCategory`, `DiscoveryWarning` |
//! | [`value_objects`] | `ConfigValue`, `ConfigurationStore`, lifecycle enums |
//! | [`ports`] | `Service`, `Startable`, `ServiceLookup`, `ConfigSlot`, `ConfigurationSource`, `LoadedConfiguration` |
//! | [`constants`] | Well-known configuration keys and namespaces |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ErrorCategory, Result};
pub use ports::{
    ConfigSlot, ConfigurationSource, LoadedConfiguration, Service, ServiceInstance, ServiceLookup,
    Startable,
};
pub use value_objects::{
    ConfigMap, ConfigValue, ConfigurationStore, LifecyclePhase, LifecycleState, TeardownOrder,
};
