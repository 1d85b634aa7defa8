//! Environment loading
//!
//! Loads an optional `.env` file into the process environment and captures
//! the result as an immutable [`EnvSnapshot`]. dotenvy never overrides
//! variables that are already set, so values injected by the hosting
//! platform (e.g. `PORT`) always win over the file.

use super::env::EnvSnapshot;
use super::schema::LoggingConfig;
use crate::domain::errors::{BootstrapError, EnvError};
use crate::domain::result::Result;
use std::path::Path;

/// Loads the environment and takes the startup snapshot
///
/// This function:
/// 1. Loads `env_file` if given (it must exist), otherwise `.env` if present
/// 2. Captures the process environment into an [`EnvSnapshot`]
///
/// # Errors
///
/// Returns an error if an explicitly requested env file is missing or
/// cannot be parsed.
///
/// # Examples
///
/// ```no_run
/// use cms_bootstrap::config::load_environment;
///
/// let env = load_environment(None).expect("Failed to load environment");
/// ```
pub fn load_environment(env_file: Option<&Path>) -> Result<EnvSnapshot> {
    match env_file {
        Some(path) => {
            if !path.exists() {
                return Err(BootstrapError::Configuration(format!(
                    "Env file not found: {}",
                    path.display()
                )));
            }
            dotenvy::from_path(path)?;
            tracing::debug!(path = %path.display(), "Loaded env file");
        }
        None => match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        },
    }

    Ok(EnvSnapshot::from_process())
}

/// Reads logging settings from `LOG_FORMAT`, `LOG_DIR` and `LOG_ROTATION`
pub fn logging_config(env: &EnvSnapshot) -> Result<LoggingConfig> {
    let json = match env.get("LOG_FORMAT") {
        None => false,
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => false,
            "json" => true,
            _ => {
                return Err(EnvError::InvalidChoice {
                    var: "LOG_FORMAT".to_string(),
                    value: raw.to_string(),
                    expected: "text, json".to_string(),
                }
                .into())
            }
        },
    };

    let local_rotation = env.string("LOG_ROTATION", "daily").to_ascii_lowercase();
    let valid_rotations = ["daily", "hourly", "never"];
    if !valid_rotations.contains(&local_rotation.as_str()) {
        return Err(EnvError::InvalidChoice {
            var: "LOG_ROTATION".to_string(),
            value: local_rotation,
            expected: valid_rotations.join(", "),
        }
        .into());
    }

    Ok(LoggingConfig {
        json,
        local_path: env.optional("LOG_DIR"),
        local_rotation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Serializes tests that touch the process environment
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_load_environment_missing_explicit_file() {
        let result = load_environment(Some(Path::new("does-not-exist.env")));
        assert!(matches!(result, Err(BootstrapError::Configuration(_))));
    }

    #[test]
    fn test_load_environment_from_file() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("CMS_LOADER_TEST_VALUE");

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "CMS_LOADER_TEST_VALUE=from-file").unwrap();
        temp_file.flush().unwrap();

        let env = load_environment(Some(temp_file.path())).unwrap();
        assert_eq!(env.get("CMS_LOADER_TEST_VALUE"), Some("from-file"));

        std::env::remove_var("CMS_LOADER_TEST_VALUE");
    }

    #[test]
    fn test_load_environment_does_not_override_process_value() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("CMS_LOADER_TEST_PORT", "8080");

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "CMS_LOADER_TEST_PORT=1337").unwrap();
        temp_file.flush().unwrap();

        let env = load_environment(Some(temp_file.path())).unwrap();
        assert_eq!(env.get("CMS_LOADER_TEST_PORT"), Some("8080"));

        std::env::remove_var("CMS_LOADER_TEST_PORT");
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = logging_config(&EnvSnapshot::default()).unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_logging_config_json_with_dir() {
        let env = EnvSnapshot::from_pairs([
            ("LOG_FORMAT", "json"),
            ("LOG_DIR", "/var/log/cms"),
            ("LOG_ROTATION", "Hourly"),
        ]);
        let config = logging_config(&env).unwrap();
        assert!(config.json);
        assert_eq!(config.local_path.as_deref(), Some("/var/log/cms"));
        assert_eq!(config.local_rotation, "hourly");
    }

    #[test]
    fn test_logging_config_invalid_format() {
        let env = EnvSnapshot::from_pairs([("LOG_FORMAT", "xml")]);
        let err = logging_config(&env).unwrap_err();
        assert!(err.to_string().contains("LOG_FORMAT"));
    }

    #[test]
    fn test_logging_config_invalid_rotation() {
        let env = EnvSnapshot::from_pairs([("LOG_ROTATION", "weekly")]);
        assert!(logging_config(&env).is_err());
    }
}
