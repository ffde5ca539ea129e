//! Engine error types
//!
//! Input validation uses typed errors raised before any analysis runs.
//! Analyzer logic never fails: malformed or adversarial output text is
//! scored, not rejected, so a low score is never conflated with an error.

use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised at engine construction or at the start of `evaluate`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A required input is missing or empty
    #[error("Invalid input: {message}")]
    Input { message: String },

    /// Capsule or task is structurally invalid
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Engine configuration is out of range
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl EngineError {
    /// Create an input error (missing or empty required parameter)
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create a validation error (structurally invalid capsule or task)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error (weights or threshold out of range)
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
