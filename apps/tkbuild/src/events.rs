//! Console rendering for the event stream

use console::Style;
use tkbuild_events::{AppEvent, BuildEvent, GeneralEvent};
use tracing::Level;

/// Renders events to the console as they arrive
pub struct EventHandler {
    colors_enabled: bool,
    debug: bool,
    json_mode: bool,
}

impl EventHandler {
    #[must_use]
    pub fn new(colors_enabled: bool, debug: bool, json_mode: bool) -> Self {
        Self {
            colors_enabled,
            debug,
            json_mode,
        }
    }

    /// Render a single event
    ///
    /// Warnings and errors go to stderr, everything else to stdout.
    pub fn handle_event(&self, event: AppEvent) {
        let level = event.log_level();
        let Some(line) = self.console_line(&event) else {
            return;
        };

        if matches!(level, Level::ERROR | Level::WARN) {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Console line for an event, or `None` when nothing should be printed
    ///
    /// JSON mode suppresses all console event output so stdout stays
    /// machine-readable; debug-level events are dropped unless debug output
    /// was requested.
    fn console_line(&self, event: &AppEvent) -> Option<String> {
        if self.json_mode {
            return None;
        }
        if event.log_level() == Level::DEBUG && !self.debug {
            return None;
        }
        self.render(event)
    }

    fn render(&self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Build(build_event) => self.render_build(build_event),
            AppEvent::General(general_event) => self.render_general(general_event),
        }
    }

    fn render_build(&self, event: &BuildEvent) -> Option<String> {
        match event {
            BuildEvent::StageStarted { stage } => {
                Some(format!("==> {}", self.bold(stage.as_str())))
            }
            BuildEvent::StageCompleted { .. } => None,
            BuildEvent::CommandStarted { program, args, .. } => {
                let line = BuildEvent::command_line(program, args);
                Some(self.dim(&format!("$ {line}")))
            }
            BuildEvent::CommandCompleted {
                program,
                exit_code,
                duration,
            } => {
                if self.debug {
                    Some(self.dim(&format!(
                        "{program} exited with code {exit_code} after {}ms",
                        duration.as_millis()
                    )))
                } else {
                    None
                }
            }
            BuildEvent::ArtifactCopied { file } => {
                let name = file
                    .file_name()
                    .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
                Some(format!("  + {name}"))
            }
            BuildEvent::PackageReady {
                package_dir,
                artifact_count,
            } => Some(format!(
                "Package ready: {} ({artifact_count} artifacts)",
                package_dir.display()
            )),
        }
    }

    fn render_general(&self, event: &GeneralEvent) -> Option<String> {
        match event {
            GeneralEvent::Warning { message, context } => {
                let prefix = self.yellow("warning");
                match context {
                    Some(context) => Some(format!("{prefix}: {message} ({context})")),
                    None => Some(format!("{prefix}: {message}")),
                }
            }
            GeneralEvent::DebugLog { message, context } => {
                if context.is_empty() {
                    Some(self.dim(&format!("debug: {message}")))
                } else {
                    Some(self.dim(&format!("debug: {message} {context:?}")))
                }
            }
            GeneralEvent::OperationStarted { operation } => Some(self.bold(operation)),
            GeneralEvent::OperationCompleted { .. } => None,
            // Final error reporting happens in main
            GeneralEvent::OperationFailed { .. } => None,
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.colors_enabled {
            Style::new().bold().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.colors_enabled {
            Style::new().dim().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.colors_enabled {
            Style::new().yellow().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use tkbuild_types::Stage;

    fn plain_handler() -> EventHandler {
        EventHandler::new(false, false, false)
    }

    #[test]
    fn test_stage_started_renders_banner() {
        let handler = plain_handler();
        let event = AppEvent::Build(BuildEvent::StageStarted {
            stage: Stage::Configure,
        });

        assert_eq!(handler.render(&event), Some("==> configure".to_string()));
    }

    #[test]
    fn test_stage_completed_is_silent() {
        let handler = plain_handler();
        let event = AppEvent::Build(BuildEvent::StageCompleted {
            stage: Stage::Configure,
        });

        assert_eq!(handler.render(&event), None);
    }

    #[test]
    fn test_command_started_renders_full_command_line() {
        let handler = plain_handler();
        let event = AppEvent::Build(BuildEvent::CommandStarted {
            program: "cmake".to_string(),
            args: vec!["-B".to_string(), "build".to_string()],
            working_dir: None,
        });

        assert_eq!(handler.render(&event), Some("$ cmake -B build".to_string()));
    }

    #[test]
    fn test_command_completed_only_renders_in_debug_mode() {
        let event = AppEvent::Build(BuildEvent::CommandCompleted {
            program: "cmake".to_string(),
            exit_code: 0,
            duration: Duration::from_millis(42),
        });

        assert_eq!(plain_handler().render(&event), None);

        let debug_handler = EventHandler::new(false, true, false);
        let line = debug_handler.render(&event).unwrap();
        assert!(line.contains("cmake exited with code 0"));
        assert!(line.contains("42ms"));
    }

    #[test]
    fn test_artifact_copied_renders_file_name_only() {
        let handler = plain_handler();
        let event = AppEvent::Build(BuildEvent::ArtifactCopied {
            file: PathBuf::from("/work/build/package/libTracekit.so"),
        });

        assert_eq!(handler.render(&event), Some("  + libTracekit.so".to_string()));
    }

    #[test]
    fn test_package_ready_includes_count() {
        let handler = plain_handler();
        let event = AppEvent::Build(BuildEvent::PackageReady {
            package_dir: PathBuf::from("/work/build/package"),
            artifact_count: 2,
        });

        let line = handler.render(&event).unwrap();
        assert!(line.contains("/work/build/package"));
        assert!(line.contains("2 artifacts"));
    }

    #[test]
    fn test_warning_rendering_with_and_without_context() {
        let handler = plain_handler();

        let bare = AppEvent::General(GeneralEvent::warning("no artifacts in package"));
        assert_eq!(
            handler.render(&bare),
            Some("warning: no artifacts in package".to_string())
        );

        let with_context = AppEvent::General(GeneralEvent::warning_with_context(
            "no artifacts in package",
            "architecture inspection",
        ));
        let line = handler.render(&with_context).unwrap();
        assert!(line.contains("(architecture inspection)"));
    }

    #[test]
    fn test_operation_failed_leaves_reporting_to_main() {
        let handler = plain_handler();
        let event = AppEvent::General(GeneralEvent::OperationFailed {
            operation: "build linux_x64 (Debug)".to_string(),
            error: "command failed".to_string(),
        });

        assert_eq!(handler.render(&event), None);
    }

    #[test]
    fn test_colors_disabled_produces_plain_text() {
        let handler = plain_handler();
        let event = AppEvent::Build(BuildEvent::StageStarted {
            stage: Stage::Package,
        });

        let line = handler.render(&event).unwrap();
        assert!(!line.contains('\u{1b}'));
    }

    #[test]
    fn test_handle_event_smoke() {
        let handler = EventHandler::new(false, true, false);
        handler.handle_event(AppEvent::General(GeneralEvent::debug("resolved tool paths")));
        handler.handle_event(AppEvent::Build(BuildEvent::StageStarted {
            stage: Stage::Test,
        }));
    }

    #[test]
    fn test_debug_events_dropped_without_debug_flag() {
        let handler = plain_handler();
        let event = AppEvent::General(GeneralEvent::debug("resolved tool paths"));

        assert_eq!(handler.console_line(&event), None);

        let debug_handler = EventHandler::new(false, true, false);
        assert!(debug_handler.console_line(&event).is_some());
    }

    #[test]
    fn test_json_mode_suppresses_console_output() {
        let handler = EventHandler::new(false, true, true);

        // Events that would normally render to the console stay silent so
        // stdout carries only the machine-readable report
        let events = [
            AppEvent::Build(BuildEvent::StageStarted {
                stage: Stage::Configure,
            }),
            AppEvent::Build(BuildEvent::CommandStarted {
                program: "cmake".to_string(),
                args: vec!["-B".to_string(), "build".to_string()],
                working_dir: None,
            }),
            AppEvent::Build(BuildEvent::PackageReady {
                package_dir: PathBuf::from("/work/build/package"),
                artifact_count: 1,
            }),
            AppEvent::General(GeneralEvent::warning("heads up")),
        ];

        for event in &events {
            assert_eq!(handler.console_line(event), None);
            // Same event renders in normal mode
            assert!(plain_handler().console_line(event).is_some());
        }
    }
}
