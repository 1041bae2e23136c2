//! Build orchestration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum BuildError {
    /// External tool ran and reported failure. `exit_code` is `None` when the
    /// child was terminated by a signal.
    #[error("command failed: {program} exited with {}", exit_code.map_or_else(|| "signal".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        program: String,
        exit_code: Option<i32>,
    },

    /// External tool could not be started at all.
    #[error("failed to spawn {program}: {message}")]
    CommandSpawn { program: String, message: String },

    #[error("invalid artifact pattern {pattern}: {message}")]
    InvalidArtifactPattern { pattern: String, message: String },
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandFailed { .. } => {
                Some("Inspect the tool output above for the underlying failure.")
            }
            Self::CommandSpawn { .. } => {
                Some("Ensure the tool is installed and on PATH, or set its path in the [tools] config section.")
            }
            Self::InvalidArtifactPattern { .. } => {
                Some("Correct the artifact name fragment in the [project] config section.")
            }
        }
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::CommandFailed { .. } => "build.command_failed",
            Self::CommandSpawn { .. } => "build.command_spawn",
            Self::InvalidArtifactPattern { .. } => "build.invalid_artifact_pattern",
        };
        Some(code)
    }
}
