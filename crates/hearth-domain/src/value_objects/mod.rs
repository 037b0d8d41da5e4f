//! Value objects shared across layers

pub mod config_map;
pub mod config_value;
pub mod lifecycle;
pub mod store;

pub use config_map::ConfigMap;
pub use config_value::ConfigValue;
pub use lifecycle::{LifecyclePhase, LifecycleState, TeardownOrder};
pub use store::ConfigurationStore;
