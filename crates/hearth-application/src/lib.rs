//! Application Layer - Hearth
//!
//! Everything the container engine builds on that is not tied to a
//! configuration format or runtime: the type registry services register
//! into, the service scope holding live singletons, and configuration and
//! dependency injection.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | `TypeEntry`, linkme `REGISTERED_TYPES`, `TypeResolver` |
//! | [`scope`] | `ServiceScope` singleton registry |
//! | [`injection`] | `Setting`, `Constant`, `Inject`, value coercion |
//! | [`ports`] | `Addon` and `ContainerContext` |

pub mod injection;
pub mod ports;
pub mod registry;
pub mod scope;

pub use injection::{Constant, FromConfigValue, Inject, Setting, UniqueList};
pub use ports::{Addon, ContainerContext, ContainerHandle};
pub use registry::{
    LinkedTypeResolver, REGISTERED_TYPES, TypeEntry, TypeMarker, TypeResolver, TypeTable,
};
pub use scope::ServiceScope;

// Re-exported for exported macros
#[doc(hidden)]
pub mod __private {
    pub use hearth_domain::error::CoercionError;
    pub use hearth_domain::value_objects::ConfigValue;
}
