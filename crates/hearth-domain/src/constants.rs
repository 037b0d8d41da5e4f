//! Domain layer constants
//!
//! Configuration keys and namespaces shared by every layer. Infrastructure
//! specific constants (file locations, environment variables) live in
//! `hearth_infrastructure::constants`.

// ============================================================================
// CONTAINER IDENTITY
// ============================================================================

/// Name a container uses until configuration or embedding code overrides it
pub const DEFAULT_CONTAINER_NAME: &str = "hearth-container";

/// Prefix of every container setting key
pub const CONTAINER_SETTINGS_PREFIX: &str = "hearth.container";

// ============================================================================
// DISCOVERY KEYS
// ============================================================================

/// Ordered list of packages to scan for services
pub const CONTAINER_PACKAGES_KEY: &str = "hearth.container.packages";

/// Ordered list of fully-qualified type names to scan
pub const CONTAINER_CLASSES_KEY: &str = "hearth.container.classes";

/// Namespace under which addons are discovered
pub const ADDON_NAMESPACE: &str = "hearth::addons";

/// Separator between package segments in type names
pub const PACKAGE_SEPARATOR: &str = "::";
