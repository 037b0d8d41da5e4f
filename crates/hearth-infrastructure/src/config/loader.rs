//! Configuration loader
//!
//! Builds a `ConfigurationStore` by layering, later sources overriding
//! earlier top-level keys:
//!
//! 1. Process-level properties
//! 2. A bundled base document (if any)
//! 3. Well-known filesystem locations (each optional)
//! 4. An explicit configuration file (`hearth.configFile` property,
//!    `HEARTH_CONFIG_FILE` env var, or [`YamlConfigLoader::with_config_file`])
//!
//! A source that cannot be read, interpolated or parsed is skipped and
//! reported in [`LoadedConfiguration::skipped`]; the other layers still load.

use std::path::{Path, PathBuf};

use hearth_domain::error::{DiscoveryWarning, Error, Result};
use hearth_domain::ports::{ConfigurationSource, LoadedConfiguration};
use hearth_domain::value_objects::ConfigMap;
use tracing::{info, warn};

use super::interpolate::{VariableResolver, interpolate};
use super::yaml::parse_documents;
use crate::constants::{
    CONFIG_FILE_ENV, CONFIG_FILE_PROPERTY, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_DIRS,
    DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// YAML configuration loader
#[derive(Debug, Clone)]
pub struct YamlConfigLoader {
    bundled: Option<(String, String)>,
    search_paths: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    resolver: VariableResolver,
    use_environment: bool,
}

impl Default for YamlConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlConfigLoader {
    /// Loader over the default search paths and the process environment
    pub fn new() -> Self {
        Self {
            bundled: None,
            search_paths: Self::default_search_paths(),
            config_file: None,
            resolver: VariableResolver::new(),
            use_environment: true,
        }
    }

    /// Well-known configuration file locations, in mount order
    pub fn default_search_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = DEFAULT_CONFIG_DIRS
            .iter()
            .map(|dir| Path::new(dir).join(DEFAULT_CONFIG_FILENAME))
            .collect();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }
        paths
    }

    /// Set the bundled base document
    #[must_use]
    pub fn with_bundled(mut self, origin: impl Into<String>, text: impl Into<String>) -> Self {
        self.bundled = Some((origin.into(), text.into()));
        self
    }

    /// Replace the search paths
    #[must_use]
    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the explicit configuration file
    #[must_use]
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add a process-level property
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.resolver = self.resolver.with_property(name, value);
        self
    }

    /// Enable or disable the process environment (variables and `HEARTH_CONFIG_FILE`)
    #[must_use]
    pub fn with_environment(mut self, enabled: bool) -> Self {
        self.resolver = self.resolver.with_environment(enabled);
        self.use_environment = enabled;
        self
    }

    /// Search paths in mount order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Explicit configuration file, from the builder, the property or the environment
    pub fn explicit_config_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_file {
            return Some(path.clone());
        }
        if let Some(path) = self.resolver.properties().get(CONFIG_FILE_PROPERTY) {
            return Some(PathBuf::from(path));
        }
        if self.use_environment {
            return std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from);
        }
        None
    }

    /// Interpolate and parse one document stream
    ///
    /// # Errors
    ///
    /// Propagates interpolation and YAML errors.
    pub fn parse(&self, text: &str, origin: &str) -> Result<ConfigMap> {
        let text = interpolate(text, &self.resolver)?;
        parse_documents(&text, origin)
    }

    fn read_file(&self, path: &Path) -> Result<ConfigMap> {
        let text = std::fs::read_to_string(path)
            .config_context(format!("Failed to read configuration file {}", path.display()))?;
        self.parse(&text, &path.display().to_string())
    }
}

impl ConfigurationSource for YamlConfigLoader {
    fn load(&self) -> LoadedConfiguration {
        let mut loaded = LoadedConfiguration::default();

        let mut properties: Vec<(&String, &String)> = self.resolver.properties().iter().collect();
        properties.sort();
        for (name, value) in properties {
            loaded.store.put(name.clone(), value.clone());
        }

        if let Some((origin, text)) = &self.bundled {
            if mount(&mut loaded, origin, self.parse(text, origin)) {
                info!("Mounted config: {origin}");
            }
        }

        for path in &self.search_paths {
            if !path.is_file() {
                log_config_loaded(path, false);
                continue;
            }
            if mount(&mut loaded, &path.display().to_string(), self.read_file(path)) {
                log_config_loaded(path, true);
            }
        }

        if let Some(path) = self.explicit_config_file() {
            let origin = path.display().to_string();
            let layer = if path.is_file() {
                self.read_file(&path)
            } else {
                Err(Error::configuration(format!("Configuration file not found: {origin}")))
            };
            if mount(&mut loaded, &origin, layer) {
                log_config_loaded(&path, true);
            }
        }

        loaded
    }
}

/// Layer one source, or record it as skipped
fn mount(loaded: &mut LoadedConfiguration, origin: &str, layer: Result<ConfigMap>) -> bool {
    match layer {
        Ok(map) => {
            loaded.store.merge(map);
            true
        }
        Err(e) => {
            warn!(source = origin, error = %e, "Skipping configuration source");
            loaded.skipped.push(DiscoveryWarning::new(origin, e));
            false
        }
    }
}
