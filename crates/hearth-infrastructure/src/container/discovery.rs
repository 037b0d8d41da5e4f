//! Addon discovery and the package/class crawl

use hearth_application::registry::{Constructor, TypeEntry};
use hearth_domain::constants::{ADDON_NAMESPACE, CONTAINER_CLASSES_KEY, CONTAINER_PACKAGES_KEY};
use hearth_domain::error::{Error, Result};
use hearth_domain::ports::{ServiceInstance, ServiceLookup};
use hearth_domain::value_objects::ConfigurationStore;
use tracing::{debug, info, warn};

use super::Container;
use super::lifecycle::ManagedService;
use crate::error_ext::ErrorContext;

impl Container {
    /// Instantiate every addon under the addon namespace
    pub(super) fn discover_addons(&mut self) {
        for entry in self.resolver.types_in_package(ADDON_NAMESPACE) {
            let Constructor::Addon(factory) = entry.constructor else {
                debug!(addon = entry.name, "Skipping non-instantiable addon type");
                continue;
            };

            match factory().discovery_context(entry.name, "Addon construction failed") {
                Ok(addon) => {
                    self.packages_to_scan.extend(addon.packages_to_scan());
                    self.classes_to_scan.extend(addon.classes_to_scan());
                    debug!(addon = addon.name(), "Loaded addon");
                    self.addons.push(addon);
                }
                Err(e) => self.record_warning(entry.name, e),
            }
        }

        info!("Container discovered {} addons.", self.addons.len());
    }

    /// Process every configured and queued package, then every class
    pub(super) fn crawl(&mut self, configuration: &ConfigurationStore) {
        self.processed.clear();
        self.discovered_types.clear();
        self.services.clear();

        let mut packages = self.configured_targets(configuration, CONTAINER_PACKAGES_KEY);
        packages.extend(self.packages_to_scan.iter().cloned());

        for package in packages {
            let mut entries = self.resolver.types_in_package(&package);
            if entries.is_empty() {
                debug!(package = %package, "No registered types in package");
            }
            if self.settings.sort_discovered_types {
                entries.sort_by(|a, b| a.name.cmp(b.name));
            }
            for entry in entries {
                self.process_type(entry, configuration);
            }
        }

        let mut classes = self.configured_targets(configuration, CONTAINER_CLASSES_KEY);
        classes.extend(self.classes_to_scan.iter().cloned());

        for class in classes {
            match self.resolver.load(&class) {
                Ok(entry) => {
                    self.process_type(entry, configuration);
                }
                Err(e) => self.record_warning(&class, e),
            }
        }

        info!(
            "Container considered {} types and discovered {} services.",
            self.discovered_types.len(),
            self.services.len()
        );
    }

    fn configured_targets(&mut self, configuration: &ConfigurationStore, key: &str) -> Vec<String> {
        configuration.get_string_list(key).unwrap_or_else(|e| {
            self.record_warning(key, e);
            Vec::new()
        })
    }

    /// Process one type at most once per crawl
    ///
    /// Returns the registered instance when the type is a singleton service.
    pub(super) fn process_type(
        &mut self,
        entry: TypeEntry,
        configuration: &ConfigurationStore,
    ) -> Option<ServiceInstance> {
        if !self.processed.insert(entry.name.to_string()) {
            return None;
        }
        self.discovered_types.push(entry.name.to_string());

        if let Some(type_id) = entry.service_type_id() {
            if let Some(existing) = self.scope.lookup(type_id) {
                self.record_warning(
                    entry.name,
                    Error::discovery(
                        entry.name,
                        format!("{} already has a registered instance", existing.type_name()),
                    ),
                );
                return None;
            }
        }

        if entry.is_service() {
            return match instantiate(&entry, configuration) {
                Ok(instance) => {
                    if let Some(replaced) = self.scope.register(instance.clone()) {
                        warn!(
                            service = entry.name,
                            replaced = replaced.type_name(),
                            "Replaced a registered instance"
                        );
                    }
                    self.services
                        .push(ManagedService::new(entry.name, instance.clone()));
                    debug!(service = entry.name, "Discovered service");
                    Some(instance)
                }
                Err(e) => {
                    self.record_warning(entry.name, e);
                    None
                }
            };
        }

        if self.settings.scan_nested_types {
            for nested in entry.nested {
                match self.resolver.load(nested) {
                    Ok(child) => {
                        self.process_type(child, configuration);
                    }
                    Err(e) => self.record_warning(nested, e),
                }
            }
        }

        None
    }
}

/// Intercepted instance or a freshly constructed one
fn instantiate(entry: &TypeEntry, configuration: &ConfigurationStore) -> Result<ServiceInstance> {
    let Constructor::Service { factory, type_id } = entry.constructor else {
        return Err(Error::discovery(
            entry.name,
            "Singleton type has no no-argument constructor",
        ));
    };

    if let Some(intercepted) = configuration.get_instance(entry.name) {
        if intercepted.type_id() != type_id() {
            return Err(Error::discovery(
                entry.name,
                format!(
                    "Intercepting instance is a {}, not the registered type",
                    intercepted.type_name()
                ),
            ));
        }
        debug!(service = entry.name, "Using intercepted instance");
        return Ok(intercepted.clone());
    }

    factory().discovery_context(entry.name, "Construction failed")
}
