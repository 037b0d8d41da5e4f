//! Lifecycle value objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of a single managed service
///
/// Services move forward through these states on `start()`. Teardown runs
/// pre-destroy before stop, so a torn-down service passes through
/// `PreDestroyed` and ends in `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Constructed (or intercepted) and registered in the scope
    #[default]
    Discovered,
    /// Dependencies and configuration slots are populated
    Injected,
    /// Post-construct hook completed
    PostConstructed,
    /// Start capability completed
    Started,
    /// Pre-destroy hook completed
    PreDestroyed,
    /// Teardown finished
    Stopped,
}

impl LifecycleState {
    /// Whether teardown must visit a service in this state
    pub fn needs_teardown(self) -> bool {
        matches!(self, Self::PostConstructed | Self::Started)
    }
}

/// Hook or operation being run against a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecyclePhase {
    /// Dependency and configuration injection
    Inject,
    /// Post-construct hook
    PostConstruct,
    /// Start capability
    Start,
    /// Pre-destroy hook
    PreDestroy,
    /// Stop capability
    Stop,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Inject => "inject",
            Self::PostConstruct => "post-construct",
            Self::Start => "start",
            Self::PreDestroy => "pre-destroy",
            Self::Stop => "stop",
        };
        f.write_str(label)
    }
}

/// Order in which `stop()` visits services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeardownOrder {
    /// Last discovered is torn down first
    #[default]
    Reverse,
    /// Same order as discovery (legacy behavior)
    Discovery,
}
