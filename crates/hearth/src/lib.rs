//! # Hearth
//!
//! A minimal application container. Services and addons register themselves
//! into a link-time table; the container discovers them from configured
//! packages, injects configuration and dependencies, and drives them through
//! an ordered lifecycle.
//!
//! ## Example
//!
//! ```ignore
//! use hearth::prelude::*;
//!
//! #[derive(Default)]
//! pub struct Greeter {
//!     greeting: Setting<String>,
//! }
//!
//! impl Service for Greeter {
//!     fn config_slots(&self) -> Vec<&dyn ConfigSlot> {
//!         vec![&self.greeting]
//!     }
//! }
//!
//! #[linkme::distributed_slice(REGISTERED_TYPES)]
//! static GREETER: TypeEntry = hearth::singleton!(Greeter);
//!
//! let mut container = Container::new();
//! container.add_package_to_scan(module_path!());
//! container.start().await?;
//! let greeter = container.get::<Greeter>();
//! container.stop().await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, configuration values, lifecycle enums and service ports
//! - `application` - type registry, service scope, configuration and dependency injection
//! - `infrastructure` - configuration loading, logging and the container engine
//! - `cli` - the `hearth` binary

pub mod cli;

/// Domain layer - errors, configuration values and service ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use hearth_domain::*;
}

/// Application layer - registry, scope and injection
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use hearth_application::*;
}

/// Infrastructure layer - configuration, logging and the container
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use hearth_infrastructure::*;
}

// Registration macros
pub use hearth_application::{config_enum, named_service, singleton};

// Re-export the main entry points at the crate root
pub use hearth_domain::error::{Error, Result};
pub use hearth_infrastructure::{Container, ContainerSettings, StartReport, YamlConfigLoader};

/// Everything a service or addon implementation usually needs
pub mod prelude {
    pub use hearth_application::ports::{Addon, ContainerContext, ContainerHandle};
    pub use hearth_application::registry::{REGISTERED_TYPES, TypeEntry, TypeTable};
    pub use hearth_application::{Constant, FromConfigValue, Inject, Setting, UniqueList};
    pub use hearth_domain::error::{Error, Result};
    pub use hearth_domain::ports::{ConfigSlot, Service, ServiceInstance, ServiceLookup, Startable};
    pub use hearth_domain::value_objects::{ConfigValue, ConfigurationStore};
    pub use hearth_infrastructure::{Container, ContainerState, StartReport};
}
