//! Error types for the converter module.

use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Conversion options were malformed or out of range.
    #[error("Invalid conversion options: {reason}")]
    InvalidOptions { reason: String },

    /// Unexpected fault while producing the output.
    #[error("Conversion failed: {reason}")]
    Internal { reason: String },
}

impl ConverterError {
    /// Creates a new invalid options error.
    pub fn invalid_options(reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            reason: reason.into(),
        }
    }

    /// Creates a new internal error.
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Whether the caller supplied bad input (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidOptions { .. })
    }
}
