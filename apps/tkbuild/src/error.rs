//! CLI error handling

use std::fmt;

use tkbuild_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Error from the orchestration crates
    App(tkbuild_errors::Error),
    /// I/O error from rendering
    Io(std::io::Error),
}

impl CliError {
    /// Process exit code for this error
    ///
    /// Delegates to the underlying error so a failed external command
    /// propagates the child's own exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::App(e) => e.exit_code(),
            CliError::Io(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::App(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<tkbuild_errors::Error> for CliError {
    fn from(e: tkbuild_errors::Error) -> Self {
        CliError::App(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
