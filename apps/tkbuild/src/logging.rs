//! Structured logging for the event stream
//!
//! Every event is mirrored into `tracing` with structured fields so the
//! JSON log file carries the same information as the console output.

use tkbuild_events::{AppEvent, BuildEvent, GeneralEvent};
use tracing::{debug, error, info, warn};

/// Log an event with structured fields
pub fn log_event(event: &AppEvent) {
    match event {
        AppEvent::Build(build_event) => log_build_event(build_event),
        AppEvent::General(general_event) => log_general_event(general_event),
    }
}

fn log_build_event(event: &BuildEvent) {
    match event {
        BuildEvent::StageStarted { stage } => {
            info!(stage = %stage, "Stage started");
        }
        BuildEvent::StageCompleted { stage } => {
            info!(stage = %stage, "Stage completed");
        }
        BuildEvent::CommandStarted {
            program,
            args,
            working_dir,
        } => {
            info!(
                program = %program,
                command = %BuildEvent::command_line(program, args),
                working_dir = ?working_dir,
                "Command started"
            );
        }
        BuildEvent::CommandCompleted {
            program,
            exit_code,
            duration,
        } => {
            info!(
                program = %program,
                exit_code = exit_code,
                duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "Command completed"
            );
        }
        BuildEvent::ArtifactCopied { file } => {
            debug!(file = %file.display(), "Artifact copied");
        }
        BuildEvent::PackageReady {
            package_dir,
            artifact_count,
        } => {
            info!(
                package_dir = %package_dir.display(),
                artifact_count = artifact_count,
                "Package ready"
            );
        }
    }
}

fn log_general_event(event: &GeneralEvent) {
    match event {
        GeneralEvent::Warning { message, context } => {
            warn!(context = ?context, "{message}");
        }
        GeneralEvent::DebugLog { message, context } => {
            if context.is_empty() {
                debug!("{message}");
            } else {
                debug!(context = ?context, "{message}");
            }
        }
        GeneralEvent::OperationStarted { operation } => {
            info!(operation = %operation, "Operation started");
        }
        GeneralEvent::OperationCompleted { operation, success } => {
            if *success {
                info!(operation = %operation, "Operation completed");
            } else {
                warn!(operation = %operation, "Operation completed with issues");
            }
        }
        GeneralEvent::OperationFailed { operation, error } => {
            error!(operation = %operation, error = %error, "Operation failed");
        }
    }
}
