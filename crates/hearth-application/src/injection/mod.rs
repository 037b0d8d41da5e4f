//! Configuration and dependency injection
//!
//! - **coerce** - `FromConfigValue` conversions and symbolic enums
//! - **setting** - `Setting` and `Constant` slots
//! - **dependency** - `Inject` holders for collaborating services
//! - **binder** - assigning store values to a service's slots

pub mod binder;
pub mod coerce;
pub mod dependency;
pub mod setting;

pub use binder::{inject_config, inject_service};
pub use coerce::{FromConfigValue, UniqueList, coerce_symbol};
pub use dependency::Inject;
pub use setting::{Constant, Setting};
