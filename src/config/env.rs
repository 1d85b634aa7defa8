//! Immutable snapshot of the process environment with typed accessors
//!
//! Builders never call `std::env::var` themselves. The environment is read
//! once into an [`EnvSnapshot`] and every configuration section is derived
//! from that snapshot, so a startup sees one consistent view.
//!
//! Empty and whitespace-only values are treated as absent by every accessor.
//! Malformed values are errors naming the variable; they never fall back to
//! the default.

use crate::domain::errors::EnvError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Read-only view of environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the current process environment
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Builds a snapshot from explicit key/value pairs
    ///
    /// # Example
    ///
    /// ```rust
    /// use cms_bootstrap::config::EnvSnapshot;
    ///
    /// let env = EnvSnapshot::from_pairs([("HOST", "127.0.0.1")]);
    /// assert_eq!(env.string("HOST", "0.0.0.0"), "127.0.0.1");
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { vars }
    }

    /// Raw value of a variable, `None` when absent or blank
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Whether the variable is set to a non-blank value
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// String value or the supplied default
    pub fn string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// String value, `None` when absent
    pub fn optional(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    /// Integer value or the supplied default
    ///
    /// The value is trimmed and must parse completely; `"8080abc"` is an
    /// error, not `8080`.
    pub fn int<T>(&self, key: &str, default: T) -> Result<T, EnvError>
    where
        T: FromStr,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| EnvError::InvalidInteger {
                var: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Boolean value or the supplied default
    ///
    /// Accepts `true/false`, `1/0`, `yes/no`, `on/off` (case-insensitive).
    pub fn bool(&self, key: &str, default: bool) -> Result<bool, EnvError> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(EnvError::InvalidBoolean {
                var: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Comma-separated list or the supplied default
    ///
    /// A surrounding `[...]` and per-item quotes are stripped; blank items
    /// are dropped.
    pub fn array(&self, key: &str, default: &[&str]) -> Vec<String> {
        let Some(raw) = self.get(key) else {
            return default.iter().map(|s| s.to_string()).collect();
        };

        let trimmed = raw.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(trimmed);

        inner
            .split(',')
            .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}
