//! Addon port

use hearth_domain::error::Result;

use super::context::ContainerContext;

/// Extension point discovered before any service
///
/// Addons are found by scanning the addon namespace for types that can be
/// instantiated as addons. Each one contributes packages and types to scan,
/// then gets to configure the container before services are initialized.
/// An addon that fails to construct is skipped with a warning; a failing hook
/// aborts `start()`.
pub trait Addon: Send + Sync {
    /// Name used in logs and warnings
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Packages to add to the scan list
    fn packages_to_scan(&self) -> Vec<String> {
        Vec::new()
    }

    /// Fully-qualified type names to add to the scan list
    fn classes_to_scan(&self) -> Vec<String> {
        Vec::new()
    }

    /// Runs after discovery, before any service is initialized
    fn configure(&self, _container: &dyn ContainerContext) -> Result<()> {
        Ok(())
    }

    /// Runs after every discovered service has been injected and initialized
    fn post_inject(&self, _container: &dyn ContainerContext) -> Result<()> {
        Ok(())
    }
}
