//! Configuration
//!
//! - **loader** - `YamlConfigLoader`, the layered configuration source
//! - **interpolate** - `${NAME:default}` variable substitution
//! - **yaml** - YAML documents to `ConfigValue` conversion
//! - **settings** - figment-extracted `ContainerSettings`

pub mod interpolate;
pub mod loader;
pub mod settings;
pub mod yaml;

pub use interpolate::{VariableResolver, interpolate};
pub use loader::YamlConfigLoader;
pub use settings::ContainerSettings;
