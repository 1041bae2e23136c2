#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in tkbuild
//!
//! All progress and diagnostic output from the orchestrator goes through
//! events - no direct logging or printing is allowed outside the CLI. The
//! CLI drains the channel concurrently with the running operation and
//! renders events to the console.

pub mod events;
pub use events::{AppEvent, BuildEvent, GeneralEvent};

use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender using the `AppEvent` system
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver using the `AppEvent` system
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel with the `AppEvent` system
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout the tkbuild system
///
/// This trait provides a single, consistent API for emitting events regardless
/// of whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a debug log event with context
    fn emit_debug_with_context(
        &self,
        message: impl Into<String>,
        context: std::collections::HashMap<String, String>,
    ) {
        self.emit(AppEvent::General(GeneralEvent::debug_with_context(
            message, context,
        )));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            success,
        }));
    }

    /// Emit an operation failed event
    fn emit_operation_failed(&self, operation: impl Into<String>, error: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            error: error.into(),
        }));
    }

    /// Emit a stage started event
    fn emit_stage_started(&self, stage: tkbuild_types::Stage) {
        self.emit(AppEvent::Build(BuildEvent::StageStarted { stage }));
    }

    /// Emit a stage completed event
    fn emit_stage_completed(&self, stage: tkbuild_types::Stage) {
        self.emit(AppEvent::Build(BuildEvent::StageCompleted { stage }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
