use serde::{Deserialize, Serialize};

// Declare all domain modules
pub mod build;
pub mod general;

// Re-export all domain events
pub use build::*;
pub use general::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, debug logs, operations)
    General(GeneralEvent),

    /// Build orchestration events (stages, external commands, packaging)
    Build(BuildEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    ///
    /// The CLI uses this both for log records and to route console output:
    /// warnings and errors go to stderr, debug-level events only show up
    /// when debug output was requested.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::OperationFailed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Build(BuildEvent::ArtifactCopied { .. }) => Level::DEBUG,

            // Default to INFO for most events
            _ => Level::INFO,
        }
    }
}
