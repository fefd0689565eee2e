//! Error types for fluentq.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialectError {
    /// A dialect descriptor violates a structural invariant.
    #[error("Malformed '{dialect}' descriptor: {message}")]
    Descriptor { dialect: String, message: String },

    /// Connection settings are missing or invalid for the dialect.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Surfaced from the built query's own execute call.
    #[error("Execution error: {0}")]
    Execution(String),
}

impl DialectError {
    /// Create a descriptor malformation error.
    pub fn descriptor(dialect: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Descriptor {
            dialect: dialect.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for fluentq operations.
pub type DialectResult<T> = Result<T, DialectError>;
