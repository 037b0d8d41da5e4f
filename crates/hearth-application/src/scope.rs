//! Service scope
//!
//! The registry of live singletons inside one container. Instances are keyed
//! by their concrete type, so a scope holds at most one instance per type.

use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;
use hearth_domain::error::Result;
use hearth_domain::ports::{Service, ServiceInstance, ServiceLookup};
use tracing::debug;

/// Singleton registry backing a container
pub struct ServiceScope {
    name: String,
    instances: DashMap<TypeId, ServiceInstance>,
}

impl ServiceScope {
    /// Create an empty scope
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instances: DashMap::new(),
        }
    }

    /// Scope name (the owning container's name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an instance under its concrete type
    ///
    /// Returns the instance previously registered for that type, if any.
    pub fn register(&self, instance: ServiceInstance) -> Option<ServiceInstance> {
        debug!(scope = %self.name, service = instance.type_name(), "Registered service instance");
        self.instances.insert(instance.type_id(), instance)
    }

    /// Register a plain value and return the shared handle
    pub fn register_value<T: Service>(&self, value: T) -> Arc<T> {
        let shared = Arc::new(value);
        self.register(ServiceInstance::from_arc(Arc::clone(&shared)));
        shared
    }

    /// Typed lookup
    pub fn get<T: Service>(&self) -> Option<Arc<T>> {
        self.instances
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value().downcast::<T>())
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop every registered instance
    pub fn clear(&self) {
        self.instances.clear();
    }

    /// Resolve the dependencies of a service against this scope
    pub fn inject(&self, service: &dyn Service) -> Result<()> {
        service.inject(self)
    }

    /// Run the post-construct hook of an instance
    pub async fn post_construct(&self, instance: &ServiceInstance) -> Result<()> {
        instance.service().post_construct().await
    }

    /// Run the pre-destroy hook of an instance
    pub async fn pre_destroy(&self, instance: &ServiceInstance) -> Result<()> {
        instance.service().pre_destroy().await
    }
}

impl ServiceLookup for ServiceScope {
    fn lookup(&self, type_id: TypeId) -> Option<ServiceInstance> {
        self.instances.get(&type_id).map(|entry| entry.value().clone())
    }
}

impl std::fmt::Debug for ServiceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceScope")
            .field("name", &self.name)
            .field("instances", &self.instances.len())
            .finish()
    }
}
