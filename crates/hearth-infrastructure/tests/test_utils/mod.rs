//! Shared test fixtures
//!
//! Services record their lifecycle calls into an [`EventLog`] singleton that
//! every fixture resolves from the scope, so tests can assert on ordering.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hearth_application::injection::{Inject, Setting};
use hearth_application::ports::{Addon, ContainerContext};
use hearth_application::registry::{TypeEntry, TypeMarker, TypeTable};
use hearth_domain::error::{Error, Result};
use hearth_domain::ports::{ConfigSlot, Service, ServiceLookup, Startable};
use hearth_domain::value_objects::ConfigurationStore;
use hearth_infrastructure::Container;

// ============================================================================
// Event Log
// ============================================================================

/// Ordered record of lifecycle calls
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Events of one kind (`start`, `stop`, ...) as service names, in order
    pub fn of_kind(&self, kind: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| {
                event
                    .split_once(':')
                    .filter(|(_, k)| *k == kind)
                    .map(|(who, _)| who.to_string())
            })
            .collect()
    }
}

impl Service for EventLog {}

fn record(log: &Inject<EventLog>, who: &str, what: &str) {
    if let Some(log) = log.get() {
        log.push(format!("{who}:{what}"));
    }
}

// ============================================================================
// Probe Services
// ============================================================================

/// Startable service recording every lifecycle call
macro_rules! recording_service {
    ($name:ident) => {
        #[derive(Default)]
        pub struct $name {
            log: Inject<EventLog>,
        }

        #[async_trait]
        impl Service for $name {
            fn inject(&self, lookup: &dyn ServiceLookup) -> Result<()> {
                self.log.resolve(lookup)?;
                Ok(())
            }

            async fn post_construct(&self) -> Result<()> {
                record(&self.log, stringify!($name), "post_construct");
                Ok(())
            }

            async fn pre_destroy(&self) -> Result<()> {
                record(&self.log, stringify!($name), "pre_destroy");
                Ok(())
            }

            fn as_startable(&self) -> Option<&dyn Startable> {
                Some(self)
            }
        }

        #[async_trait]
        impl Startable for $name {
            async fn start(&self) -> Result<()> {
                record(&self.log, stringify!($name), "start");
                Ok(())
            }

            async fn stop(&self) -> Result<()> {
                record(&self.log, stringify!($name), "stop");
                Ok(())
            }
        }
    };
}

recording_service!(Alpha);
recording_service!(Beta);
recording_service!(Gamma);

// ============================================================================
// Configured Services
// ============================================================================

/// Singleton with configuration slots and a dependency
pub struct Greeter {
    log: Inject<EventLog>,
    pub original: Setting<String>,
    pub configured: Setting<String>,
    post_constructed: Mutex<bool>,
}

impl Default for Greeter {
    fn default() -> Self {
        Self {
            log: Inject::new(),
            original: Setting::new("greeter.original", "Hello".to_string()),
            configured: Setting::new("greeter.configured", "Hello".to_string()),
            post_constructed: Mutex::new(false),
        }
    }
}

impl Greeter {
    pub fn did_post_construct_run(&self) -> bool {
        *self
            .post_constructed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn has_log(&self) -> bool {
        self.log.is_resolved()
    }
}

#[async_trait]
impl Service for Greeter {
    fn config_slots(&self) -> Vec<&dyn ConfigSlot> {
        vec![&self.original, &self.configured]
    }

    fn inject(&self, lookup: &dyn ServiceLookup) -> Result<()> {
        self.log.resolve(lookup)?;
        Ok(())
    }

    async fn post_construct(&self) -> Result<()> {
        *self
            .post_constructed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = true;
        record(&self.log, "Greeter", "post_construct");
        Ok(())
    }

    async fn pre_destroy(&self) -> Result<()> {
        record(&self.log, "Greeter", "pre_destroy");
        Ok(())
    }
}

/// Named service used for interception
#[derive(Debug)]
pub struct Clock {
    pub label: String,
    log: Inject<EventLog>,
}

impl Clock {
    pub fn labelled(label: &str) -> Self {
        Self {
            label: label.to_string(),
            log: Inject::new(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::labelled("constructed")
    }
}

#[async_trait]
impl Service for Clock {
    fn inject(&self, lookup: &dyn ServiceLookup) -> Result<()> {
        self.log.resolve(lookup)?;
        Ok(())
    }

    async fn post_construct(&self) -> Result<()> {
        record(&self.log, "Clock", "post_construct");
        Ok(())
    }

    async fn pre_destroy(&self) -> Result<()> {
        record(&self.log, "Clock", "pre_destroy");
        Ok(())
    }

    fn as_startable(&self) -> Option<&dyn Startable> {
        Some(self)
    }
}

#[async_trait]
impl Startable for Clock {
    async fn start(&self) -> Result<()> {
        record(&self.log, "Clock", "start");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        record(&self.log, "Clock", "stop");
        Ok(())
    }
}

/// Never registered as a singleton; created on demand
pub struct Helper {
    log: Inject<EventLog>,
    pub configured: Setting<String>,
}

impl Default for Helper {
    fn default() -> Self {
        Self {
            log: Inject::new(),
            configured: Setting::new("greeter.configured", "Hello".to_string()),
        }
    }
}

impl Helper {
    pub fn has_log(&self) -> bool {
        self.log.is_resolved()
    }
}

impl Service for Helper {
    fn config_slots(&self) -> Vec<&dyn ConfigSlot> {
        vec![&self.configured]
    }

    fn inject(&self, lookup: &dyn ServiceLookup) -> Result<()> {
        self.log.resolve(lookup)?;
        Ok(())
    }
}

// ============================================================================
// Failing Services
// ============================================================================

/// Refuses to start
#[derive(Default)]
pub struct FailingStart;

#[async_trait]
impl Service for FailingStart {
    fn as_startable(&self) -> Option<&dyn Startable> {
        Some(self)
    }
}

#[async_trait]
impl Startable for FailingStart {
    async fn start(&self) -> Result<()> {
        Err(Error::generic("start refused"))
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}

/// Starts, then fails to stop
#[derive(Default)]
pub struct FailingStop {
    log: Inject<EventLog>,
}

#[async_trait]
impl Service for FailingStop {
    fn inject(&self, lookup: &dyn ServiceLookup) -> Result<()> {
        self.log.resolve(lookup)?;
        Ok(())
    }

    async fn pre_destroy(&self) -> Result<()> {
        record(&self.log, "FailingStop", "pre_destroy");
        Ok(())
    }

    fn as_startable(&self) -> Option<&dyn Startable> {
        Some(self)
    }
}

#[async_trait]
impl Startable for FailingStop {
    async fn start(&self) -> Result<()> {
        record(&self.log, "FailingStop", "start");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Err(Error::generic("stop refused"))
    }
}

/// Takes longer to start than any test timeout
#[derive(Default)]
pub struct SlowStart;

#[async_trait]
impl Service for SlowStart {
    fn as_startable(&self) -> Option<&dyn Startable> {
        Some(self)
    }
}

#[async_trait]
impl Startable for SlowStart {
    async fn start(&self) -> Result<()> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}

/// Requires a dependency nobody registers
#[derive(Default)]
pub struct Orphan {
    helper: Inject<Helper>,
}

impl Service for Orphan {
    fn inject(&self, lookup: &dyn ServiceLookup) -> Result<()> {
        self.helper.resolve(lookup)?;
        Ok(())
    }
}

fn refuse_construction() -> Result<hearth_domain::ports::ServiceInstance> {
    Err(Error::generic("constructor refused"))
}

// ============================================================================
// Addons
// ============================================================================

/// Contributes a package that is also configured directly
#[derive(Default)]
pub struct ScanAddon;

impl Addon for ScanAddon {
    fn name(&self) -> &str {
        "scan"
    }

    fn packages_to_scan(&self) -> Vec<String> {
        vec!["fixtures::core".to_string()]
    }

    fn classes_to_scan(&self) -> Vec<String> {
        vec!["fixtures::order::Gamma".to_string()]
    }

    fn configure(&self, container: &dyn ContainerContext) -> Result<()> {
        if let Some(log) = container.get::<EventLog>() {
            log.push("scan:configure");
        }
        Ok(())
    }

    fn post_inject(&self, container: &dyn ContainerContext) -> Result<()> {
        if let Some(log) = container.get::<EventLog>() {
            log.push(format!("scan:post_inject:{}", container.discovered_services().len()));
        }
        Ok(())
    }
}

/// Fails in its configure hook
#[derive(Default)]
pub struct BrokenHookAddon;

impl Addon for BrokenHookAddon {
    fn configure(&self, _container: &dyn ContainerContext) -> Result<()> {
        Err(Error::generic("configure refused"))
    }
}

fn refuse_addon() -> Result<Box<dyn Addon>> {
    Err(Error::generic("addon refused"))
}

// ============================================================================
// Type Tables
// ============================================================================

pub const EVENT_LOG: TypeEntry = TypeEntry::singleton::<EventLog>("fixtures::core::EventLog", "fixtures::core");
pub const GREETER: TypeEntry = TypeEntry::singleton::<Greeter>("fixtures::core::Greeter", "fixtures::core");
pub const CLOCK: TypeEntry = TypeEntry::named_service::<Clock>("fixtures::core::Clock", "fixtures::core");
pub const HELPER: TypeEntry = TypeEntry::abstract_type("fixtures::core::Helper", "fixtures::core");

pub const ALPHA: TypeEntry = TypeEntry::singleton::<Alpha>("fixtures::order::Alpha", "fixtures::order");
pub const BETA: TypeEntry = TypeEntry::singleton::<Beta>("fixtures::order::Beta", "fixtures::order");
pub const GAMMA: TypeEntry = TypeEntry::singleton::<Gamma>("fixtures::order::Gamma", "fixtures::extra");

pub const FAILING_START: TypeEntry =
    TypeEntry::singleton::<FailingStart>("fixtures::broken::FailingStart", "fixtures::broken");
pub const FAILING_STOP: TypeEntry =
    TypeEntry::singleton::<FailingStop>("fixtures::teardown::FailingStop", "fixtures::teardown");
pub const SLOW_START: TypeEntry =
    TypeEntry::singleton::<SlowStart>("fixtures::slow::SlowStart", "fixtures::slow");
pub const ORPHAN: TypeEntry = TypeEntry::singleton::<Orphan>("fixtures::orphan::Orphan", "fixtures::orphan");
pub const UNCONSTRUCTIBLE: TypeEntry = TypeEntry::service_from::<Alpha>(
    "fixtures::faulty::Unconstructible",
    "fixtures::faulty",
    TypeMarker::Singleton,
    refuse_construction,
);
pub const ABSTRACT_SINGLETON: TypeEntry = TypeEntry {
    marker: TypeMarker::Singleton,
    ..TypeEntry::abstract_type("fixtures::faulty::AbstractSingleton", "fixtures::faulty")
};

pub const OUTER: TypeEntry = TypeEntry::abstract_type("fixtures::nested::Outer", "fixtures::nested")
    .with_nested(&["fixtures::nested::Outer::Inner"]);
pub const INNER: TypeEntry =
    TypeEntry::singleton::<Gamma>("fixtures::nested::Outer::Inner", "fixtures::nested::Outer");

pub const SCAN_ADDON: TypeEntry = TypeEntry::addon::<ScanAddon>("hearth::addons::ScanAddon", "hearth::addons");
pub const BROKEN_HOOK_ADDON: TypeEntry =
    TypeEntry::addon::<BrokenHookAddon>("hearth::addons::BrokenHookAddon", "hearth::addons");
pub const REFUSED_ADDON: TypeEntry =
    TypeEntry::addon_from("hearth::addons::RefusedAddon", "hearth::addons", refuse_addon);
pub const ABSTRACT_ADDON: TypeEntry =
    TypeEntry::abstract_type("hearth::addons::AbstractAddon", "hearth::addons");

/// Every well-behaved fixture type
pub fn fixture_table() -> TypeTable {
    TypeTable::new()
        .with(EVENT_LOG)
        .with(GREETER)
        .with(CLOCK)
        .with(HELPER)
        .with(ALPHA)
        .with(BETA)
        .with(GAMMA)
}

/// Container over `table` with a pre-seeded configuration and no environment
pub fn container_with(table: TypeTable, configuration: ConfigurationStore) -> Container {
    Container::new()
        .with_name("test-container")
        .with_resolver(table)
        .with_configuration(configuration)
        .with_settings_from_environment(false)
}

/// Configuration scanning the given packages
pub fn scanning(packages: &[&str]) -> ConfigurationStore {
    ConfigurationStore::new().with(
        "hearth.container.packages",
        packages.iter().map(|p| p.to_string()).collect::<Vec<String>>(),
    )
}
