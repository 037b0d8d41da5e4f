//! Type Registry
//!
//! Services and addons register a [`TypeEntry`] into [`REGISTERED_TYPES`]
//! with `#[linkme::distributed_slice(REGISTERED_TYPES)]`. The container
//! walks packages through a [`TypeResolver`].

pub mod resolver;
pub mod types;

pub use resolver::{LinkedTypeResolver, REGISTERED_TYPES, TypeResolver, TypeTable};
pub use types::{AddonFactory, Constructor, ServiceFactory, TypeEntry, TypeMarker};
