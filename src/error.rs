//! Error types and handling for `SkyBrief`

use thiserror::Error;

/// Main error type for the `SkyBrief` library
#[derive(Error, Debug)]
pub enum BriefingError {
    /// Configuration-related errors. Fatal at startup.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A weather source failed (network, timeout, non-2xx, bad payload)
    #[error("Weather source {source_name} unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl BriefingError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new source-unavailable error
    pub fn source_unavailable<N: Into<String>, S: Into<String>>(source_name: N, message: S) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            BriefingError::Config { .. } => {
                "Configuration error. Please check your config file, thresholds and API keys."
                    .to_string()
            }
            BriefingError::SourceUnavailable { source_name, .. } => {
                format!("Weather source {source_name} is currently unavailable.")
            }
            BriefingError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            BriefingError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = BriefingError::config("bad thresholds");
        assert!(matches!(config_err, BriefingError::Config { .. }));

        let source_err = BriefingError::source_unavailable("CheckWX", "timed out");
        assert!(matches!(source_err, BriefingError::SourceUnavailable { .. }));

        let validation_err = BriefingError::validation("invalid ICAO");
        assert!(matches!(validation_err, BriefingError::Validation { .. }));
    }

    #[test]
    fn test_display_includes_source_name() {
        let err = BriefingError::source_unavailable("MET Norway", "HTTP 503");
        assert_eq!(err.to_string(), "Weather source MET Norway unavailable: HTTP 503");
    }

    #[test]
    fn test_user_messages() {
        let config_err = BriefingError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let source_err = BriefingError::source_unavailable("CheckWX", "test");
        assert!(source_err.user_message().contains("CheckWX"));

        let validation_err = BriefingError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BriefingError = io_err.into();
        assert!(matches!(err, BriefingError::Io { .. }));
    }
}
