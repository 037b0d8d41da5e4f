//! Application Port Interfaces
//!
//! - **addon** - extension points run before discovery
//! - **context** - what addons and services see of the running container

/// Addon extension point
pub mod addon;
/// Container context
pub mod context;

pub use addon::Addon;
pub use context::{ContainerContext, ContainerHandle};
