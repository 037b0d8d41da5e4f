//! Service ports
//!
//! A service is any type the container constructs once, injects, and drives
//! through its lifecycle. Every hook has a no-op default so plain types only
//! implement what they need.
//!
//! ## Example
//!
//! ```
//! use async_trait::async_trait;
//! use hearth_domain::error::Result;
//! use hearth_domain::ports::{Service, Startable};
//!
//! #[derive(Default)]
//! struct Ticker;
//!
//! #[async_trait]
//! impl Service for Ticker {
//!     fn as_startable(&self) -> Option<&dyn Startable> {
//!         Some(self)
//!     }
//! }
//!
//! #[async_trait]
//! impl Startable for Ticker {
//!     async fn start(&self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     async fn stop(&self) -> Result<()> {
//!         Ok(())
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::ConfigSlot;
use crate::error::Result;

/// A type whose instances the container manages
#[async_trait]
pub trait Service: Send + Sync + 'static {
    /// Name used in logs and errors
    fn service_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Configuration slots populated before post-construct
    fn config_slots(&self) -> Vec<&dyn ConfigSlot> {
        Vec::new()
    }

    /// Resolve dependencies from the scope
    fn inject(&self, _lookup: &dyn ServiceLookup) -> Result<()> {
        Ok(())
    }

    /// Runs after injection, before start
    async fn post_construct(&self) -> Result<()> {
        Ok(())
    }

    /// Runs when the container stops, before stop
    async fn pre_destroy(&self) -> Result<()> {
        Ok(())
    }

    /// Start/stop capability, if the service has one
    fn as_startable(&self) -> Option<&dyn Startable> {
        None
    }
}

/// Start/stop capability of a service
///
/// The container awaits each call before moving on to the next service.
#[async_trait]
pub trait Startable: Send + Sync {
    /// Bring the service up
    async fn start(&self) -> Result<()>;

    /// Bring the service down
    async fn stop(&self) -> Result<()>;
}

/// Read access to registered service instances
pub trait ServiceLookup: Send + Sync {
    /// Instance registered under the given concrete type
    fn lookup(&self, type_id: TypeId) -> Option<ServiceInstance>;
}

impl<'a> dyn ServiceLookup + 'a {
    /// Typed [`ServiceLookup::lookup`]
    pub fn resolve<T: Service>(&self) -> Option<Arc<T>> {
        self.lookup(TypeId::of::<T>())
            .and_then(|instance| instance.downcast::<T>())
    }
}

/// Shared handle to a service instance with its concrete type erased
///
/// Keeps both an `Any` view (for typed lookups) and a [`Service`] view (for
/// lifecycle calls) of the same allocation.
#[derive(Clone)]
pub struct ServiceInstance {
    type_id: TypeId,
    type_name: &'static str,
    any: Arc<dyn Any + Send + Sync>,
    service: Arc<dyn Service>,
}

impl ServiceInstance {
    /// Wrap a freshly built service
    pub fn new<T: Service>(service: T) -> Self {
        Self::from_arc(Arc::new(service))
    }

    /// Wrap an already shared service
    pub fn from_arc<T: Service>(service: Arc<T>) -> Self {
        let any: Arc<dyn Any + Send + Sync> = service.clone();
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            any,
            service,
        }
    }

    /// Concrete type of the instance
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name of the instance
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the instance is a `T`
    pub fn is<T: Service>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Typed handle to the instance
    pub fn downcast<T: Service>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.any).downcast::<T>().ok()
    }

    /// Lifecycle view of the instance
    pub fn service(&self) -> &Arc<dyn Service> {
        &self.service
    }

    /// Whether both handles point at the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.any), Arc::as_ptr(&other.any))
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInstance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ServiceInstance {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}
