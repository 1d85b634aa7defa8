//! Runtime mode and production secret policy

use super::env::EnvSnapshot;
use crate::domain::errors::EnvError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Variable selecting the runtime mode
pub const MODE_VAR: &str = "NODE_ENV";

/// Variable selecting the production secret policy
pub const SECRET_POLICY_VAR: &str = "SECRET_POLICY";

/// Development vs. production behaviour switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// Permissive defaults
    #[default]
    Development,
    /// Strict validation
    Production,
}

impl RuntimeMode {
    /// Derives the mode from `NODE_ENV`
    ///
    /// Only `production` (trimmed, case-insensitive) selects production;
    /// anything else, including absence, is development.
    pub fn from_env(env: &EnvSnapshot) -> Self {
        match env.get(MODE_VAR) {
            Some(value) if value.trim().eq_ignore_ascii_case("production") => {
                RuntimeMode::Production
            }
            _ => RuntimeMode::Development,
        }
    }

    /// Whether this is production mode
    pub fn is_production(self) -> bool {
        self == RuntimeMode::Production
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeMode::Development => write!(f, "development"),
            RuntimeMode::Production => write!(f, "production"),
        }
    }
}

/// What to do when a security-relevant secret is missing in production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecretPolicy {
    /// Refuse to supply a value; startup is reported as not ready
    #[default]
    FailFast,
    /// Generate an ephemeral value and warn loudly
    GenerateWithWarning,
}

impl SecretPolicy {
    /// Reads `SECRET_POLICY`, defaulting to fail-fast
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, EnvError> {
        match env.get(SECRET_POLICY_VAR) {
            None => Ok(SecretPolicy::default()),
            Some(raw) => raw.parse().map_err(|_| EnvError::InvalidChoice {
                var: SECRET_POLICY_VAR.to_string(),
                value: raw.to_string(),
                expected: "fail-fast, generate".to_string(),
            }),
        }
    }
}

impl FromStr for SecretPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "failfast" | "strict" => Ok(SecretPolicy::FailFast),
            "generate" | "generate-with-warning" => Ok(SecretPolicy::GenerateWithWarning),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SecretPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretPolicy::FailFast => write!(f, "fail-fast"),
            SecretPolicy::GenerateWithWarning => write!(f, "generate"),
        }
    }
}

/// Mode and policy, derived once per startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeContext {
    /// Runtime mode
    pub mode: RuntimeMode,

    /// Policy for missing secrets; only consulted in production
    pub secret_policy: SecretPolicy,
}

impl RuntimeContext {
    /// Creates a context from explicit values
    pub fn new(mode: RuntimeMode, secret_policy: SecretPolicy) -> Self {
        Self {
            mode,
            secret_policy,
        }
    }

    /// Derives the context from the environment snapshot
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, EnvError> {
        Ok(Self {
            mode: RuntimeMode::from_env(env),
            secret_policy: SecretPolicy::from_env(env)?,
        })
    }

    /// Development context
    pub fn development() -> Self {
        Self::new(RuntimeMode::Development, SecretPolicy::default())
    }

    /// Production context with the given policy
    pub fn production(secret_policy: SecretPolicy) -> Self {
        Self::new(RuntimeMode::Production, secret_policy)
    }
}
