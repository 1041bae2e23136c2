use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tkbuild_types::Stage;

/// Build orchestration events for the event system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildEvent {
    /// A stage of the fixed sequence started
    StageStarted { stage: Stage },

    /// A stage of the fixed sequence completed
    StageCompleted { stage: Stage },

    /// External command about to run
    CommandStarted {
        program: String,
        args: Vec<String>,
        working_dir: Option<PathBuf>,
    },

    /// External command exited
    CommandCompleted {
        program: String,
        exit_code: i32,
        duration: Duration,
    },

    /// One artifact file copied into the package directory
    ArtifactCopied { file: PathBuf },

    /// Package directory fully assembled
    PackageReady {
        package_dir: PathBuf,
        artifact_count: usize,
    },
}

impl BuildEvent {
    /// Render the command line the way it would be typed in a shell
    ///
    /// Used for the console echo before each external invocation; the actual
    /// execution never goes through a shell.
    #[must_use]
    pub fn command_line(program: &str, args: &[String]) -> String {
        if args.is_empty() {
            program.to_string()
        } else {
            format!("{program} {}", args.join(" "))
        }
    }
}
