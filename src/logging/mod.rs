//! Logging and diagnostics output
//!
//! This module provides:
//! - Structured logging via `tracing`, as text or JSON
//! - Optional rolling JSON log files
//! - The [`DiagnosticSink`] that turns builder diagnostics into log lines
//!
//! # Example
//!
//! ```no_run
//! use cms_bootstrap::logging::{init_logging, DiagnosticSink, TracingSink};
//! use cms_bootstrap::config::LoggingConfig;
//! use cms_bootstrap::domain::Diagnostics;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.info("server", "Listening on 0.0.0.0:1337");
//! TracingSink.emit_all(&diagnostics);
//! ```

pub mod sink;
pub mod structured;

// Re-export commonly used items
pub use sink::{DiagnosticSink, RecordingSink, TracingSink};
pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cms_bootstrap::log_error_with_context;
/// use cms_bootstrap::domain::BootstrapError;
///
/// let error = BootstrapError::Configuration("PORT is out of range".to_string());
/// log_error_with_context!(&error, "Failed to assemble configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a secret fallback without its value
///
/// # Example
///
/// ```no_run
/// use cms_bootstrap::log_secret_fallback;
/// use cms_bootstrap::config::ResolvedSecret;
///
/// let secret = ResolvedSecret::generated();
/// log_secret_fallback!("JWT_SECRET", &secret);
/// ```
#[macro_export]
macro_rules! log_secret_fallback {
    ($var:expr, $secret:expr) => {
        tracing::debug!(
            var = $var,
            fingerprint = %$secret.fingerprint(),
            ephemeral = $secret.is_ephemeral(),
            "Secret resolved"
        );
    };
}
