//! Action invocation error types.

use thiserror::Error;

/// Errors that can occur while resolving or invoking an action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Action not found in registry.
    #[error("Action not found: {0}")]
    NotFound(String),

    /// A required positional argument was not supplied.
    #[error("Missing argument '{name}' (position {position})")]
    MissingArgument { name: &'static str, position: usize },

    /// An argument could not be converted or was not expected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Action execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Process spawn or exit error.
    #[error("Process error: {0}")]
    Process(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ActionError {
    fn from(e: std::io::Error) -> Self {
        ActionError::Io(e.to_string())
    }
}

impl From<reqwest::Error> for ActionError {
    fn from(e: reqwest::Error) -> Self {
        ActionError::Http(e.to_string())
    }
}
