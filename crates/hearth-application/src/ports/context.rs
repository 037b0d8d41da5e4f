//! Container context port

use std::any::TypeId;
use std::sync::Arc;

use hearth_domain::ports::{Service, ServiceInstance, ServiceLookup};
use hearth_domain::value_objects::ConfigurationStore;

/// View of a container handed to addons
pub trait ContainerContext: ServiceLookup {
    /// Container name
    fn name(&self) -> &str;

    /// Configuration store in effect
    fn configuration(&self) -> Arc<ConfigurationStore>;

    /// Services discovered so far, in discovery order
    fn discovered_services(&self) -> Vec<ServiceInstance>;

    /// Register an extra instance in the service scope
    ///
    /// Registered instances are available for lookups and injection but are
    /// not part of the discovered set, so the lifecycle never drives them.
    fn register_instance(&self, instance: ServiceInstance);
}

impl<'a> dyn ContainerContext + 'a {
    /// Typed lookup of a registered instance
    pub fn get<T: Service>(&self) -> Option<Arc<T>> {
        self.lookup(TypeId::of::<T>())
            .and_then(|instance| instance.downcast::<T>())
    }
}

/// Registered in every scope so services can reach their container
#[derive(Debug, Clone)]
pub struct ContainerHandle {
    name: String,
    configuration: Arc<ConfigurationStore>,
}

impl ContainerHandle {
    /// Handle for a container
    pub fn new(name: impl Into<String>, configuration: Arc<ConfigurationStore>) -> Self {
        Self {
            name: name.into(),
            configuration,
        }
    }

    /// Container name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration the container booted with
    pub fn configuration(&self) -> &ConfigurationStore {
        &self.configuration
    }
}

impl Service for ContainerHandle {}
