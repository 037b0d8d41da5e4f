//! Error handling types

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::value_objects::LifecyclePhase;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error accepted as a source from foreign crates
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification of every [`Error`] variant
///
/// The container treats each category differently: configuration and
/// discovery problems are logged and skipped while the container boots,
/// injection and lifecycle problems abort startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Unreadable source, malformed interpolation, missing variable
    Configuration,
    /// Unknown type, failed factory, failed addon construction
    Discovery,
    /// Unsupported or constant configuration slot, missing dependency
    Injection,
    /// A lifecycle hook or addon hook failed or timed out
    Lifecycle,
    /// The container was driven out of order
    State,
}

/// Why a configuration value could not be assigned to a slot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The value kind has no coercion into the slot type
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Kind the slot accepts
        expected: &'static str,
        /// Kind found in the store
        found: &'static str,
    },

    /// A symbolic value did not match any enum member
    #[error("'{value}' is not one of {allowed:?}")]
    UnknownSymbol {
        /// Value found in the store
        value: String,
        /// Accepted symbols
        allowed: Vec<&'static str>,
    },

    /// The value parsed but does not fit the slot type
    #[error("'{value}' is out of range for {target}")]
    OutOfRange {
        /// Value found in the store
        value: String,
        /// Slot type
        target: &'static str,
    },

    /// The slot is a constant and cannot be assigned
    #[error("slot is constant")]
    Constant,
}

/// Main error type for Hearth
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Malformed `${...}` interpolation in a configuration document
    #[error("Invalid config file at line {line}: {message}")]
    Interpolation {
        /// Description of the syntax problem
        message: String,
        /// One-based line of the offending variable
        line: usize,
    },

    /// A required `${NAME}` variable has no value and no default
    #[error("Could not find a value for variable '{name}'")]
    MissingVariable {
        /// Variable name as written in the document
        name: String,
    },

    /// A scan target could not be discovered
    #[error("Discovery of '{target}' failed: {message}")]
    Discovery {
        /// Package or type name being discovered
        target: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A configuration value has no coercion into the slot type
    #[error(
        "Field type not supported for configuration injection: {service}.{field} ({type_name}): {source}"
    )]
    UnsupportedFieldType {
        /// Service owning the slot
        service: String,
        /// Configuration key of the slot
        field: String,
        /// Declared slot type
        type_name: &'static str,
        /// Mismatch detail
        #[source]
        source: CoercionError,
    },

    /// A configuration value matched the slot type but not its domain
    #[error("Invalid value for {service}.{field} ({type_name}): {source}")]
    InvalidFieldValue {
        /// Service owning the slot
        service: String,
        /// Configuration key of the slot
        field: String,
        /// Declared slot type
        type_name: &'static str,
        /// Coercion detail
        #[source]
        source: CoercionError,
    },

    /// A service exposes a constant as a configuration slot
    #[error("Configurable fields should never be constant: {service}.{field}")]
    ImmutableField {
        /// Service owning the slot
        service: String,
        /// Configuration key of the slot
        field: String,
    },

    /// Dependency injection failed
    #[error("Injection failed for {service}: {message}")]
    Injection {
        /// Service being injected
        service: String,
        /// Description of the failure
        message: String,
    },

    /// A lifecycle hook of a service failed
    #[error("{phase} of {service} failed: {source}")]
    Lifecycle {
        /// Service whose hook failed
        service: String,
        /// Hook that failed
        phase: LifecyclePhase,
        /// Error raised by the hook
        #[source]
        source: Box<Error>,
    },

    /// A lifecycle hook of a service did not complete in time
    #[error("{phase} of {service} did not complete within {timeout:?}")]
    LifecycleTimeout {
        /// Service whose hook stalled
        service: String,
        /// Hook that stalled
        phase: LifecyclePhase,
        /// Configured limit
        timeout: Duration,
    },

    /// An addon hook failed
    #[error("Addon {addon} failed during {hook}: {source}")]
    Addon {
        /// Addon name
        addon: String,
        /// Hook that failed
        hook: &'static str,
        /// Error raised by the hook
        #[source]
        source: Box<Error>,
    },

    /// `start()` was called on a container that already ran it
    #[error("Container '{container}' has already been started")]
    AlreadyStarted {
        /// Container name
        container: String,
    },

    /// `stop()` was called on a container that never started
    #[error("Container '{container}' has not been started")]
    NotStarted {
        /// Container name
        container: String,
    },

    /// One or more services failed while the container was stopping
    #[error("Teardown finished with {} failure(s)", .failures.len())]
    Teardown {
        /// Every failure, in teardown order
        failures: Vec<Error>,
    },

    /// Error raised by service code
    #[error("{0}")]
    Generic(#[from] BoxError),
}

// Basic error creation methods
impl Error {
    /// Create a generic error, typically from service code
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into().into())
    }

    /// Create a discovery error
    pub fn discovery<T: Into<String>, S: Into<String>>(target: T, message: S) -> Self {
        Self::Discovery {
            target: target.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a discovery error with source
    pub fn discovery_with_source<
        T: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        target: T,
        message: S,
        source: E,
    ) -> Self {
        Self::Discovery {
            target: target.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a dependency injection error
    pub fn injection<T: Into<String>, S: Into<String>>(service: T, message: S) -> Self {
        Self::Injection {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Wrap the failure of a lifecycle hook
    pub fn lifecycle<S: Into<String>>(service: S, phase: LifecyclePhase, source: Error) -> Self {
        Self::Lifecycle {
            service: service.into(),
            phase,
            source: Box::new(source),
        }
    }

    /// Wrap the failure of an addon hook
    pub fn addon<S: Into<String>>(addon: S, hook: &'static str, source: Error) -> Self {
        Self::Addon {
            addon: addon.into(),
            hook,
            source: Box::new(source),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an interpolation syntax error
    pub fn interpolation<S: Into<String>>(message: S, line: usize) -> Self {
        Self::Interpolation {
            message: message.into(),
            line,
        }
    }

    /// Create a missing variable error
    pub fn missing_variable<S: Into<String>>(name: S) -> Self {
        Self::MissingVariable { name: name.into() }
    }
}

// Classification
impl Error {
    /// Category this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. }
            | Self::Configuration { .. }
            | Self::Interpolation { .. }
            | Self::MissingVariable { .. } => ErrorCategory::Configuration,
            Self::Discovery { .. } => ErrorCategory::Discovery,
            Self::UnsupportedFieldType { .. }
            | Self::InvalidFieldValue { .. }
            | Self::ImmutableField { .. }
            | Self::Injection { .. } => ErrorCategory::Injection,
            Self::Lifecycle { .. }
            | Self::LifecycleTimeout { .. }
            | Self::Addon { .. }
            | Self::Teardown { .. }
            | Self::Generic(_) => ErrorCategory::Lifecycle,
            Self::AlreadyStarted { .. } | Self::NotStarted { .. } => ErrorCategory::State,
        }
    }
}

/// Non-fatal problem recorded while the container discovered its services
#[derive(Debug)]
pub struct DiscoveryWarning {
    /// Stage or scan target that failed (package, type, addon or `configuration`)
    pub target: String,
    /// What went wrong
    pub error: Error,
}

impl DiscoveryWarning {
    /// Create a warning for the given target
    pub fn new<S: Into<String>>(target: S, error: Error) -> Self {
        Self {
            target: target.into(),
            error,
        }
    }
}

impl fmt::Display for DiscoveryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.error)
    }
}
