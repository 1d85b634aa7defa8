//! Domain error types
//!
//! This module defines the error hierarchy for the bootstrap resolver.
//! Malformed environment values always surface as [`EnvError`] naming the
//! offending variable; they are never coerced to a default.

use thiserror::Error;

/// Main bootstrap error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed environment variable
    #[error("Environment error: {0}")]
    Env(#[from] EnvError),

    /// Secrets refused under the fail-fast policy
    #[error("Missing required secrets: {}", vars.join(", "))]
    MissingSecrets {
        /// Names of the environment variables that must be set
        vars: Vec<String>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Environment variable parsing errors
///
/// Every variant carries the variable name so the operator can fix the
/// deployment without guessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Value is not an integer
    #[error("{var} must be an integer, got {value:?}")]
    InvalidInteger { var: String, value: String },

    /// Value is not a recognised boolean spelling
    #[error("{var} must be a boolean (true/false), got {value:?}")]
    InvalidBoolean { var: String, value: String },

    /// Value parsed but lies outside the accepted range
    #[error("{var} is out of range: {reason}")]
    OutOfRange { var: String, reason: String },

    /// Value is not one of the accepted choices
    #[error("{var} must be one of: {expected}, got {value:?}")]
    InvalidChoice {
        var: String,
        value: String,
        expected: String,
    },
}

impl EnvError {
    /// Name of the environment variable that caused the error
    pub fn var(&self) -> &str {
        match self {
            EnvError::InvalidInteger { var, .. }
            | EnvError::InvalidBoolean { var, .. }
            | EnvError::OutOfRange { var, .. }
            | EnvError::InvalidChoice { var, .. } => var,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::Io(err.to_string())
    }
}

// Conversion from dotenvy errors
impl From<dotenvy::Error> for BootstrapError {
    fn from(err: dotenvy::Error) -> Self {
        BootstrapError::Configuration(format!("Failed to load env file: {err}"))
    }
}
