//! Error types for the logger system

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with the operation and path that failed
    #[error("IO error while {operation} '{}': {source}", .path.display())]
    IoOperation {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Logger already cleaned up
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("Config", "format_prefix must not be empty");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::other("boom");
        assert!(matches!(err, LoggerError::Other(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("Config", "format_prefix must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for Config: format_prefix must not be empty"
        );

        assert_eq!(LoggerError::LoggerStopped.to_string(), "Logger already stopped");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("creating log directory", "/var/log/flog", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        let text = err.to_string();
        assert!(text.contains("creating log directory"));
        assert!(text.contains("/var/log/flog"));
        assert!(text.contains("access denied"));
    }
}
