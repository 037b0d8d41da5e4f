//! Container settings
//!
//! Settings are extracted with figment, merged in this order (later sources
//! override earlier):
//! 1. Programmatic defaults
//! 2. `hearth.container.*` values in the configuration store
//! 3. Environment variables with prefix (e.g., `HEARTH_CONTAINER_SCAN_NESTED_TYPES`)

use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Serialized};
use hearth_application::injection::{FromConfigValue, coerce_symbol};
use hearth_domain::constants::{CONTAINER_SETTINGS_PREFIX, DEFAULT_CONTAINER_NAME};
use hearth_domain::error::{CoercionError, Error, Result};
use hearth_domain::value_objects::{ConfigValue, ConfigurationStore, TeardownOrder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::SETTINGS_ENV_PREFIX;
use crate::error_ext::ErrorContext;

/// Behaviour switches of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// Container name
    pub name: String,
    /// Order services are torn down in
    pub teardown_order: TeardownOrder,
    /// Recurse into nested types of unmarked types during discovery
    pub scan_nested_types: bool,
    /// Sort every package listing by type name
    pub sort_discovered_types: bool,
    /// Upper bound for each lifecycle hook, in milliseconds
    pub lifecycle_timeout_ms: Option<u64>,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONTAINER_NAME.to_string(),
            teardown_order: TeardownOrder::default(),
            scan_nested_types: false,
            sort_discovered_types: false,
            lifecycle_timeout_ms: None,
        }
    }
}

fn setting_key(field: &str) -> String {
    format!("{CONTAINER_SETTINGS_PREFIX}.{field}")
}

fn invalid(field: &str, source: CoercionError) -> Error {
    Error::configuration_with_source(format!("Invalid setting {}", setting_key(field)), source)
}

fn coerce<T: FromConfigValue + Serialize>(field: &str, value: &ConfigValue) -> Result<Value> {
    let typed = T::from_config_value(value).map_err(|source| invalid(field, source))?;
    serde_json::to_value(typed).config_context(format!("Invalid setting {}", setting_key(field)))
}

impl ContainerSettings {
    /// Lifecycle timeout as a duration
    pub fn lifecycle_timeout(&self) -> Option<Duration> {
        self.lifecycle_timeout_ms.map(Duration::from_millis)
    }

    /// Extract settings on top of `defaults`
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a setting has the wrong type.
    pub fn extract(
        defaults: &ContainerSettings,
        store: &ConfigurationStore,
        use_environment: bool,
    ) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(defaults))
            .merge(Serialized::defaults(Self::store_layer(store)?));

        if use_environment {
            figment = figment.merge(Env::prefixed(SETTINGS_ENV_PREFIX));
        }

        figment
            .extract()
            .config_context("Failed to extract container settings")
    }

    fn store_layer(store: &ConfigurationStore) -> Result<Map<String, Value>> {
        let mut layer = Map::new();

        for field in [
            "name",
            "teardown_order",
            "scan_nested_types",
            "sort_discovered_types",
            "lifecycle_timeout_ms",
        ] {
            let Some(value) = store.get(&setting_key(field)).filter(|v| !v.is_null()) else {
                continue;
            };
            let json = match field {
                "name" => coerce::<String>(field, value)?,
                "scan_nested_types" | "sort_discovered_types" => coerce::<bool>(field, value)?,
                "lifecycle_timeout_ms" => coerce::<u64>(field, value)?,
                _ => {
                    let order = coerce_symbol(
                        value,
                        &[
                            ("reverse", TeardownOrder::Reverse),
                            ("discovery", TeardownOrder::Discovery),
                        ],
                    )
                    .map_err(|source| invalid(field, source))?;
                    serde_json::to_value(order)
                        .config_context(format!("Invalid setting {}", setting_key(field)))?
                }
            };
            layer.insert(field.to_string(), json);
        }

        Ok(layer)
    }
}
