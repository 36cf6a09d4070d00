//! Error types for the dental_shade library

use thiserror::Error;

/// Result type alias for dental_shade operations
pub type Result<T> = std::result::Result<T, DiagnosticsError>;

/// Error types for diagnostics operations
///
/// Most degenerate inputs (an empty gum sample, a shade already past its
/// target) are answered with defined fallback values, not errors. What remains
/// here are true defects at the boundary of the closed catalog and invalid
/// configuration.
#[derive(Error, Debug)]
#[must_use]
pub enum DiagnosticsError {
    /// A shade code that is not part of the reference catalog
    #[error("Unknown shade code: {code:?}")]
    UnknownShade { code: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Every catalog entry was filtered out before matching
    #[error("No eligible shades left to match against")]
    EmptyCatalogSelection,

    /// Configuration could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DiagnosticsError {
    /// Create an invalid-parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Unknown shades and empty selections are programming defects against a
    /// closed catalog; retrying with the same input cannot succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DiagnosticsError::InvalidParameter { .. } | DiagnosticsError::ConfigError { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            DiagnosticsError::UnknownShade { code } => {
                format!("The shade \"{}\" is not part of the reference guide.", code)
            }
            DiagnosticsError::InvalidParameter { .. } => {
                "Some of the analysis inputs were invalid. Please try again.".to_string()
            }
            DiagnosticsError::ConfigError { .. } => {
                "The analysis settings could not be loaded.".to_string()
            }
            _ => "Color analysis failed. Please try with a different photo.".to_string(),
        }
    }
}
