//! Infrastructure layer constants
//!
//! File locations and environment variables. Configuration keys shared with
//! other layers are defined in `hearth_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "hearth.yaml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "hearth";

/// Well-known directories searched for the configuration file, in order
///
/// `$HOME/hearth` is appended after these at runtime.
pub const DEFAULT_CONFIG_DIRS: [&str; 5] = [
    "/hearth",
    "/usr/local/hearth",
    "/opt/hearth",
    "/etc/hearth",
    "/etc/opt/hearth",
];

/// Property naming an explicit configuration file
pub const CONFIG_FILE_PROPERTY: &str = "hearth.configFile";

/// Environment variable naming an explicit configuration file
pub const CONFIG_FILE_ENV: &str = "HEARTH_CONFIG_FILE";

/// Environment variable prefix for container settings
pub const SETTINGS_ENV_PREFIX: &str = "HEARTH_CONTAINER_";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "HEARTH_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name prefix of rolling log files
pub const LOG_FILE_PREFIX: &str = "hearth";
