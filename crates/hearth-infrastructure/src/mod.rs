//! Infrastructure Layer - Hearth
//!
//! The container engine and the technical concerns around it.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`container`] | `Container`, `StartReport`, discovery and lifecycle |
//! | [`config`] | YAML loader, interpolation, figment-backed settings |
//! | [`logging`] | tracing subscriber setup |
//! | [`error_ext`] | `ErrorContext` extension trait |
//! | [`addons`] | Built-in addons |
//! | [`constants`] | File locations and environment variables |

pub mod addons;
pub mod config;
pub mod constants;
pub mod container;
pub mod error_ext;
pub mod logging;

pub use config::{ContainerSettings, VariableResolver, YamlConfigLoader};
pub use container::{Container, ContainerState, ManagedService, StartReport};
pub use error_ext::ErrorContext;
pub use logging::{LoggingConfig, init_logging};
