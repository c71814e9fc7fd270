//! Error types for pi-remote

use thiserror::Error;

/// Main error type for pi-remote
#[derive(Debug, Error)]
pub enum PiRemoteError {
    /// Transport setup or authentication failed while opening a session
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A command could not be run over an open session
    #[error("Command `{command}` failed: {reason}")]
    Execution { command: String, reason: String },

    /// Non-forced removal of a directory that still has content
    #[error("Failed to remove {0}, because the directory has some content in it")]
    NotEmpty(String),

    /// Operation exists but has no implementation yet
    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using PiRemoteError
pub type Result<T> = std::result::Result<T, PiRemoteError>;

impl PiRemoteError {
    /// Create an authentication error from a string
    pub fn auth(msg: impl Into<String>) -> Self {
        PiRemoteError::Auth(msg.into())
    }

    /// Create an execution error for `command`
    pub fn execution(command: impl Into<String>, reason: impl Into<String>) -> Self {
        PiRemoteError::Execution {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create the execution error reported when a command outlives its timeout
    pub fn timeout(command: impl Into<String>, timeout_ms: u64) -> Self {
        Self::execution(command, format!("timed out after {}ms", timeout_ms))
    }

    /// Create an invalid params error from a string
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        PiRemoteError::InvalidParams(msg.into())
    }

    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        PiRemoteError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PiRemoteError::auth("Password authentication rejected");
        assert_eq!(
            err.to_string(),
            "Authentication failed: Password authentication rejected"
        );

        let err = PiRemoteError::timeout("sleep 10", 5000);
        assert_eq!(
            err.to_string(),
            "Command `sleep 10` failed: timed out after 5000ms"
        );
    }

    #[test]
    fn test_not_empty_names_directory() {
        let err = PiRemoteError::NotEmpty("photos".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to remove photos, because the directory has some content in it"
        );
    }
}
