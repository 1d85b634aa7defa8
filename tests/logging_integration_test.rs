//! Integration tests for logging configuration

use cms_bootstrap::config::{logging_config, EnvSnapshot, LoggingConfig};
use cms_bootstrap::config::ResolvedSecret;
use cms_bootstrap::domain::BootstrapError;
use cms_bootstrap::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = logging_config(&EnvSnapshot::default()).unwrap();
    assert_eq!(config, LoggingConfig::default());
}

#[test]
fn test_logging_directory_creation() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("nested").join("logs");
    let config = LoggingConfig {
        json: true,
        local_path: Some(log_dir.to_string_lossy().to_string()),
        local_rotation: "never".to_string(),
    };

    // The only test in this binary that installs the global subscriber
    let guard = init_logging("debug", &config).unwrap();
    tracing::info!("written to the rolling file");
    drop(guard);

    assert!(log_dir.is_dir());
}

#[test]
fn test_logging_rotation_types() {
    for rotation in ["daily", "hourly", "never"] {
        let env = EnvSnapshot::from_pairs([("LOG_ROTATION", rotation)]);
        assert_eq!(logging_config(&env).unwrap().local_rotation, rotation);
    }

    let env = EnvSnapshot::from_pairs([("LOG_ROTATION", "weekly")]);
    assert!(matches!(
        logging_config(&env),
        Err(BootstrapError::Env(ref e)) if e.var() == "LOG_ROTATION"
    ));
}

#[test]
fn test_invalid_log_format() {
    let env = EnvSnapshot::from_pairs([("LOG_FORMAT", "xml")]);
    let err = logging_config(&env).unwrap_err();
    assert!(err.to_string().contains("LOG_FORMAT"));
}

#[test]
fn test_logging_macros_usage() {
    use cms_bootstrap::{log_error_with_context, log_secret_fallback};

    let error = BootstrapError::Configuration("test error".to_string());
    log_error_with_context!(&error, "Test context");

    let secret = ResolvedSecret::generated();
    log_secret_fallback!("JWT_SECRET", &secret);
}
