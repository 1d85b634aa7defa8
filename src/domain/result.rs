//! Result type alias for the bootstrap resolver
//!
//! This module provides a convenient Result type alias that uses
//! BootstrapError as the error type.

use super::errors::BootstrapError;

/// Result type alias for bootstrap operations
///
/// # Examples
///
/// ```
/// use cms_bootstrap::domain::result::Result;
/// use cms_bootstrap::domain::errors::BootstrapError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(BootstrapError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BootstrapError>;
