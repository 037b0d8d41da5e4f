//! Application container
//!
//! Discovers addons and singleton services, injects them and drives them
//! through their lifecycle.
//!
//! ## Start sequence
//!
//! ```text
//! load configuration ─► settings ─► fresh ServiceScope ─► addons ─► crawl
//!        (failures here become discovery warnings)
//!
//! addon configure ─► per service: inject ─► post-construct ─► start ─► addon post-inject
//!        (failures here abort start)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use hearth_infrastructure::container::Container;
//!
//! let mut container = Container::new().with_name("orders");
//! container.add_package_to_scan("orders::services");
//!
//! let report = container.start().await?;
//! let repo = container.get::<OrderRepository>();
//! container.stop().await?;
//! ```

mod discovery;
mod lifecycle;

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use hearth_application::injection::inject_service;
use hearth_application::ports::{Addon, ContainerContext, ContainerHandle};
use hearth_application::registry::{LinkedTypeResolver, TypeResolver};
use hearth_application::scope::ServiceScope;
use hearth_domain::error::{DiscoveryWarning, Error, Result};
use hearth_domain::ports::{ConfigurationSource, Service, ServiceInstance, ServiceLookup};
use hearth_domain::value_objects::{ConfigurationStore, LifecycleState};
use tracing::{error, info, warn};

pub use lifecycle::ManagedService;

use crate::config::{ContainerSettings, YamlConfigLoader};
use crate::logging::log_discovery_warning;

/// Overall state of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerState {
    /// Built, not started yet
    Created,
    /// `start()` is running
    Starting,
    /// Every service initialized
    Started,
    /// Initialization aborted; already-initialized services are still running
    Failed,
    /// Torn down
    Stopped,
}

/// Summary returned by a successful `start()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    /// Effective container name
    pub container: String,
    /// Discovered services, in discovery order
    pub services: Vec<String>,
    /// Loaded addons
    pub addons: Vec<String>,
    /// Non-fatal discovery problems
    pub warnings: Vec<String>,
}

impl StartReport {
    /// Whether discovery finished without warnings
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl fmt::Display for StartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Container '{}' started with {} service(s) and {} addon(s)",
            self.container,
            self.services.len(),
            self.addons.len()
        )?;
        for service in &self.services {
            writeln!(f, "  service: {service}")?;
        }
        for addon in &self.addons {
            writeln!(f, "  addon:   {addon}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "  warning: {warning}")?;
        }
        Ok(())
    }
}

/// Application container
pub struct Container {
    settings: ContainerSettings,
    settings_from_environment: bool,
    source: Arc<dyn ConfigurationSource>,
    resolver: Arc<dyn TypeResolver>,
    configuration: Option<Arc<ConfigurationStore>>,
    scope: Arc<ServiceScope>,
    state: ContainerState,
    discovered_types: Vec<String>,
    processed: HashSet<String>,
    services: Vec<ManagedService>,
    final_states: Vec<(String, LifecycleState)>,
    addons: Vec<Box<dyn Addon>>,
    packages_to_scan: Vec<String>,
    classes_to_scan: Vec<String>,
    warnings: Vec<DiscoveryWarning>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Container over the default YAML loader and the link-time registry
    pub fn new() -> Self {
        let settings = ContainerSettings::default();
        Self {
            scope: Arc::new(ServiceScope::new(settings.name.clone())),
            settings,
            settings_from_environment: true,
            source: Arc::new(YamlConfigLoader::new()),
            resolver: Arc::new(LinkedTypeResolver),
            configuration: None,
            state: ContainerState::Created,
            discovered_types: Vec::new(),
            processed: HashSet::new(),
            services: Vec::new(),
            final_states: Vec::new(),
            addons: Vec::new(),
            packages_to_scan: Vec::new(),
            classes_to_scan: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Set the container name; `hearth.container.name` still overrides it
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.settings.name = name.into();
        self
    }

    /// Set the programmatic settings configuration is layered on
    #[must_use]
    pub fn with_settings(mut self, settings: ContainerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Enable or disable `HEARTH_CONTAINER_*` environment overrides
    #[must_use]
    pub fn with_settings_from_environment(mut self, enabled: bool) -> Self {
        self.settings_from_environment = enabled;
        self
    }

    /// Replace the configuration source
    #[must_use]
    pub fn with_configuration_source<S: ConfigurationSource + 'static>(mut self, source: S) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Pre-seed the configuration; the source is then never consulted
    #[must_use]
    pub fn with_configuration(mut self, configuration: ConfigurationStore) -> Self {
        self.set_configuration(configuration);
        self
    }

    /// Replace the type resolver
    #[must_use]
    pub fn with_resolver<R: TypeResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Replace the configuration
    pub fn set_configuration(&mut self, configuration: ConfigurationStore) {
        self.configuration = Some(Arc::new(configuration));
    }

    /// Configuration in effect (empty until loaded or supplied)
    pub fn configuration(&self) -> Arc<ConfigurationStore> {
        self.configuration.clone().unwrap_or_default()
    }

    /// Container name
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// Effective settings (after `start()`, including configuration overrides)
    pub fn settings(&self) -> &ContainerSettings {
        &self.settings
    }

    /// Overall state
    pub fn state(&self) -> ContainerState {
        self.state
    }

    /// Service scope of the current start cycle
    pub fn service_scope(&self) -> Arc<ServiceScope> {
        Arc::clone(&self.scope)
    }

    /// Add a package to scan on `start()`
    pub fn add_package_to_scan(&mut self, package: impl Into<String>) {
        self.packages_to_scan.push(package.into());
    }

    /// Add a fully-qualified type name to scan on `start()`
    pub fn add_class_to_scan(&mut self, class: impl Into<String>) {
        self.classes_to_scan.push(class.into());
    }

    /// Add a registered service type to scan on `start()`
    ///
    /// # Errors
    ///
    /// Returns a discovery error when the resolver has no entry for `T`.
    pub fn add_type_to_scan<T: Service>(&mut self) -> Result<()> {
        let entry = self.resolver.find_type(TypeId::of::<T>()).ok_or_else(|| {
            Error::discovery(std::any::type_name::<T>(), "type is not registered")
        })?;
        self.add_class_to_scan(entry.name);
        Ok(())
    }

    /// Packages queued by embedding code and addons
    pub fn packages_to_scan(&self) -> &[String] {
        &self.packages_to_scan
    }

    /// Type names queued by embedding code and addons
    pub fn classes_to_scan(&self) -> &[String] {
        &self.classes_to_scan
    }

    /// Every type processed by the crawl, in processing order
    pub fn discovered_types(&self) -> &[String] {
        &self.discovered_types
    }

    /// Discovered service instances, in discovery order
    pub fn discovered_services(&self) -> Vec<ServiceInstance> {
        self.services
            .iter()
            .map(|service| service.instance.clone())
            .collect()
    }

    /// Lifecycle state of every discovered service, in discovery order
    ///
    /// After `stop()` these are the states the services were left in.
    pub fn service_states(&self) -> Vec<(String, LifecycleState)> {
        if self.state == ContainerState::Stopped {
            return self.final_states.clone();
        }
        self.services
            .iter()
            .map(|service| (service.name.clone(), service.state))
            .collect()
    }

    /// Names of the loaded addons
    pub fn addon_names(&self) -> Vec<String> {
        self.addons.iter().map(|addon| addon.name().to_string()).collect()
    }

    /// Problems recorded while discovering
    pub fn discovery_warnings(&self) -> &[DiscoveryWarning] {
        &self.warnings
    }

    /// Registered instance of `T`
    pub fn get<T: Service>(&self) -> Option<Arc<T>> {
        self.scope.get::<T>()
    }

    /// Registered instance of `T`, or a fresh injected one when asked to
    ///
    /// Created instances are not registered, so every call creates a new one.
    ///
    /// # Errors
    ///
    /// Propagates injection failures of the created instance.
    pub fn get_or_create<T: Service + Default>(&self, create_if_absent: bool) -> Result<Option<Arc<T>>> {
        if let Some(existing) = self.get::<T>() {
            return Ok(Some(existing));
        }
        if !create_if_absent {
            return Ok(None);
        }
        let created = Arc::new(T::default());
        self.inject(created.as_ref())?;
        Ok(Some(created))
    }

    /// Resolve dependencies and assign configuration
    ///
    /// # Errors
    ///
    /// Propagates injection failures.
    pub fn inject(&self, service: &dyn Service) -> Result<()> {
        self.inject_with(service, true)
    }

    /// Resolve dependencies, assigning configuration only when asked to
    ///
    /// # Errors
    ///
    /// Propagates injection failures.
    pub fn inject_with(&self, service: &dyn Service, inject_config: bool) -> Result<()> {
        let configuration = self.configuration();
        let store = inject_config.then_some(configuration.as_ref());
        inject_service(service.service_name(), service, self.scope.as_ref(), store)
    }

    /// Discover, inject and start every service
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyStarted`] on a second call. Otherwise the first
    /// injection, lifecycle or addon hook failure, after which the container
    /// is [`ContainerState::Failed`].
    pub async fn start(&mut self) -> Result<StartReport> {
        if self.state != ContainerState::Created {
            return Err(Error::AlreadyStarted {
                container: self.name().to_string(),
            });
        }
        self.state = ContainerState::Starting;
        info!(container = %self.name(), "Starting hearth container...");

        self.prepare();

        match self.initialize().await {
            Ok(()) => {
                self.state = ContainerState::Started;
                info!(
                    container = %self.name(),
                    services = self.services.len(),
                    warnings = self.warnings.len(),
                    "Container successfully started."
                );
                Ok(self.report())
            }
            Err(e) => {
                self.state = ContainerState::Failed;
                error!(container = %self.name(), error = %e, "Container failed to start");
                Err(e)
            }
        }
    }

    /// Tear every initialized service down
    ///
    /// Every service is visited even when an earlier one fails; failures are
    /// returned together as [`Error::Teardown`]. Afterwards the scope, the
    /// discovered services and the addons are dropped, so `get` finds
    /// nothing. Stopping twice is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::NotStarted`] before `start()`, [`Error::Teardown`] on hook failures.
    pub async fn stop(&mut self) -> Result<()> {
        match self.state {
            ContainerState::Created | ContainerState::Starting => {
                return Err(Error::NotStarted {
                    container: self.name().to_string(),
                });
            }
            ContainerState::Stopped => return Ok(()),
            ContainerState::Started | ContainerState::Failed => {}
        }
        info!(container = %self.name(), "Stopping hearth container...");

        let outcome = self.destroy_services().await;
        self.final_states = self.service_states();
        self.release();
        self.state = ContainerState::Stopped;

        match &outcome {
            Ok(()) => info!(container = %self.name(), "Container successfully stopped."),
            Err(e) => warn!(container = %self.name(), error = %e, "Container stopped with failures"),
        }
        outcome
    }

    /// Steps whose failures are downgraded to warnings
    fn prepare(&mut self) {
        let configuration = if let Some(supplied) = self.configuration.clone() {
            supplied
        } else {
            let loaded = self.source.load();
            self.warnings.extend(loaded.skipped);
            let loaded = Arc::new(loaded.store);
            self.configuration = Some(Arc::clone(&loaded));
            loaded
        };

        match ContainerSettings::extract(&self.settings, &configuration, self.settings_from_environment) {
            Ok(settings) => self.settings = settings,
            Err(e) => self.record_warning("settings", e),
        }

        self.scope = Arc::new(ServiceScope::new(self.name()));
        self.scope.register(ServiceInstance::new(ContainerHandle::new(
            self.name(),
            Arc::clone(&configuration),
        )));

        self.discover_addons();
        self.crawl(&configuration);
    }

    /// Steps whose failures abort `start()`
    async fn initialize(&mut self) -> Result<()> {
        self.run_addon_hook("configure", |addon, container| addon.configure(container))?;
        self.init_services().await?;
        self.run_addon_hook("post_inject", |addon, container| addon.post_inject(container))
    }

    fn run_addon_hook(
        &self,
        hook: &'static str,
        run: fn(&dyn Addon, &dyn ContainerContext) -> Result<()>,
    ) -> Result<()> {
        for addon in &self.addons {
            run(addon.as_ref(), self).map_err(|e| Error::addon(addon.name(), hook, e))?;
        }
        Ok(())
    }

    /// Drop everything the last start cycle discovered
    fn release(&mut self) {
        self.services.clear();
        self.discovered_types.clear();
        self.processed.clear();
        self.addons.clear();
        self.scope.clear();
    }

    fn record_warning(&mut self, target: &str, error: Error) {
        log_discovery_warning(target, &error);
        self.warnings.push(DiscoveryWarning::new(target, error));
    }

    fn report(&self) -> StartReport {
        StartReport {
            container: self.name().to_string(),
            services: self.services.iter().map(|s| s.name.clone()).collect(),
            addons: self.addon_names(),
            warnings: self.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ServiceLookup for Container {
    fn lookup(&self, type_id: TypeId) -> Option<ServiceInstance> {
        self.scope.lookup(type_id)
    }
}

impl ContainerContext for Container {
    fn name(&self) -> &str {
        &self.settings.name
    }

    fn configuration(&self) -> Arc<ConfigurationStore> {
        Container::configuration(self)
    }

    fn discovered_services(&self) -> Vec<ServiceInstance> {
        Container::discovered_services(self)
    }

    fn register_instance(&self, instance: ServiceInstance) {
        self.scope.register(instance);
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("name", &self.settings.name)
            .field("state", &self.state)
            .field("services", &self.services.len())
            .field("addons", &self.addons.len())
            .field("warnings", &self.warnings.len())
            .finish_non_exhaustive()
    }
}
