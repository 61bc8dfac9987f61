//! Error types for sanitize
//!
//! This module defines the error types used throughout the crate, following
//! a hierarchical structure with specific error variants for different
//! error categories.

/// Error produced by a transformer.
///
/// Transformers report domain-specific failures; the engine treats them as
/// opaque and hands them back to the caller untouched.
pub type TransformError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while applying rules to a record
#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    /// The top-level argument is not a record (or is null)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A field references a rule that is not registered
    #[error("unsupported rule: {rule} on field {field}")]
    UnsupportedRule { rule: String, field: String },

    /// A transformer reported a failure
    #[error("{source}")]
    Transform {
        rule: String,
        field: String,
        #[source]
        source: TransformError,
    },
}

impl SanitizeError {
    /// Name of the rule involved in the failure, if any
    pub fn rule(&self) -> Option<&str> {
        match self {
            SanitizeError::InvalidInput(_) => None,
            SanitizeError::UnsupportedRule { rule, .. } | SanitizeError::Transform { rule, .. } => {
                Some(rule)
            }
        }
    }

    /// Name of the field involved in the failure, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            SanitizeError::InvalidInput(_) => None,
            SanitizeError::UnsupportedRule { field, .. }
            | SanitizeError::Transform { field, .. } => Some(field),
        }
    }
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for the expected shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but is semantically invalid
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Top-level error type for sanitize
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rule application error
    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON input could not be read or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
