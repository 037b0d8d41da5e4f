//! Configuration source port

use crate::error::DiscoveryWarning;
use crate::value_objects::ConfigurationStore;

/// Layered configuration and the sources left out of it
#[derive(Debug, Default)]
pub struct LoadedConfiguration {
    /// Every source that loaded, layered in mount order
    pub store: ConfigurationStore,
    /// Sources that failed to read, interpolate or parse, keyed by origin
    pub skipped: Vec<DiscoveryWarning>,
}

impl LoadedConfiguration {
    /// Whether every source loaded
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Builds the configuration store a container boots with
///
/// A failing source only drops itself; the remaining layers still load.
pub trait ConfigurationSource: Send + Sync {
    /// Load and layer every source into a fresh store
    fn load(&self) -> LoadedConfiguration;
}

/// A ready-made store is its own source
impl ConfigurationSource for ConfigurationStore {
    fn load(&self) -> LoadedConfiguration {
        LoadedConfiguration {
            store: self.clone(),
            skipped: Vec::new(),
        }
    }
}
