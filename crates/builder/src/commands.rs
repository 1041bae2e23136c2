//! Structured subprocess execution
//!
//! Every external tool runs as a program plus argument vector; nothing is
//! ever routed through a shell. Output streams are inherited so the tool's
//! own reporting reaches the terminal unchanged.

use std::path::Path;
use std::time::Instant;
use tkbuild_errors::{BuildError, Error, Result};
use tkbuild_events::{AppEvent, BuildEvent, EventEmitter};
use tokio::process::Command;

/// Run a command to completion, inheriting stdout and stderr
///
/// Emits `CommandStarted` before spawning and `CommandCompleted` once the
/// child exits. A non-zero exit becomes `BuildError::CommandFailed` carrying
/// the child's exit code.
///
/// # Errors
///
/// Returns an error if the program cannot be spawned or exits unsuccessfully.
pub async fn execute(
    emitter: &impl EventEmitter,
    program: &str,
    args: &[String],
    working_dir: Option<&Path>,
) -> Result<()> {
    emitter.emit(AppEvent::Build(BuildEvent::CommandStarted {
        program: program.to_string(),
        args: args.to_vec(),
        working_dir: working_dir.map(Path::to_path_buf),
    }));

    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }

    let started = Instant::now();
    let status = command.status().await.map_err(|e| {
        Error::from(BuildError::CommandSpawn {
            program: program.to_string(),
            message: e.to_string(),
        })
    })?;

    emitter.emit(AppEvent::Build(BuildEvent::CommandCompleted {
        program: program.to_string(),
        exit_code: status.code().unwrap_or(-1),
        duration: started.elapsed(),
    }));

    if status.success() {
        Ok(())
    } else {
        Err(Error::from(BuildError::CommandFailed {
            program: program.to_string(),
            exit_code: status.code(),
        }))
    }
}
