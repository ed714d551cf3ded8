//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid mode or logger configuration
    #[error("Invalid configuration for {component}: {message}")]
    Configuration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Configuration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create the configuration error reported for an unrecognized mode
    pub fn invalid_mode(mode: impl AsRef<str>) -> Self {
        Self::config("mode", format!("invalid mode: {}", mode.as_ref()))
    }

    /// Whether this error came from validating a mode or configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, LoggerError::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("encoder", "empty message key");
        assert!(matches!(err, LoggerError::Configuration { .. }));
        assert!(err.is_configuration());

        let err: LoggerError = std::io::Error::new(std::io::ErrorKind::Other, "closed").into();
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_mode("staging");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for mode: invalid mode: staging"
        );

        let err = LoggerError::config("timestamp", "bad pattern '%Q'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for timestamp: bad pattern '%Q'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LoggerError = io_err.into();

        assert!(matches!(err, LoggerError::IoError(_)));
        assert!(err.to_string().contains("pipe closed"));
    }
}
