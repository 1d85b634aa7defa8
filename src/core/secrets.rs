//! Secret resolution with environment-aware fallback
//!
//! A secret set in the environment is always used verbatim. When it is
//! missing, the outcome depends on the [`RuntimeContext`]:
//!
//! | Mode | Policy | Result | Diagnostic |
//! |---|---|---|---|
//! | development | any | generated | info |
//! | production | `GenerateWithWarning` | generated | warning |
//! | production | `FailFast` | `None` | error |
//!
//! The resolver never logs; diagnostics are returned to the caller.

use crate::config::mode::{RuntimeContext, RuntimeMode, SecretPolicy};
use crate::config::secret::ResolvedSecret;
use crate::config::EnvSnapshot;
use crate::domain::diagnostics::{Diagnostic, Diagnostics, Severity};

/// Admin JWT signing secret
pub const ADMIN_JWT_SECRET: SecretRequest =
    SecretRequest::new("ADMIN_JWT_SECRET", "admin authentication");
/// API token salt
pub const API_TOKEN_SALT: SecretRequest = SecretRequest::new("API_TOKEN_SALT", "API token");
/// Transfer token salt
pub const TRANSFER_TOKEN_SALT: SecretRequest =
    SecretRequest::new("TRANSFER_TOKEN_SALT", "transfer token");
/// Field encryption key
pub const ENCRYPTION_KEY: SecretRequest = SecretRequest::new("ENCRYPTION_KEY", "encryption");
/// End-user JWT signing secret
pub const JWT_SECRET: SecretRequest =
    SecretRequest::new("JWT_SECRET", "authentication token signing");

/// Every single-value secret class, in the order they are reported
pub const SECRET_CLASSES: [SecretRequest; 5] = [
    ADMIN_JWT_SECRET,
    API_TOKEN_SALT,
    TRANSFER_TOKEN_SALT,
    ENCRYPTION_KEY,
    JWT_SECRET,
];

/// Name and purpose of a secret to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretRequest {
    /// Environment variable holding the secret
    pub var: &'static str,

    /// Human-readable purpose, used in diagnostics
    pub purpose: &'static str,
}

impl SecretRequest {
    /// Creates a request
    pub const fn new(var: &'static str, purpose: &'static str) -> Self {
        Self { var, purpose }
    }
}

/// How a missing secret is handled in the current context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Generate quietly (development)
    Generate,
    /// Generate and warn (production, lenient policy)
    GenerateWithWarning,
    /// Refuse (production, strict policy)
    Refuse,
}

impl Fallback {
    /// Fallback for the given context
    pub fn for_context(ctx: &RuntimeContext) -> Self {
        match (ctx.mode, ctx.secret_policy) {
            (RuntimeMode::Development, _) => Fallback::Generate,
            (RuntimeMode::Production, SecretPolicy::GenerateWithWarning) => {
                Fallback::GenerateWithWarning
            }
            (RuntimeMode::Production, SecretPolicy::FailFast) => Fallback::Refuse,
        }
    }

    /// Severity of the diagnostic emitted when the fallback is taken
    pub fn severity(self) -> Severity {
        match self {
            Fallback::Generate => Severity::Info,
            Fallback::GenerateWithWarning => Severity::Warning,
            Fallback::Refuse => Severity::Error,
        }
    }
}

/// Resolves secrets from an environment snapshot
#[derive(Debug, Clone, Copy)]
pub struct SecretResolver<'a> {
    env: &'a EnvSnapshot,
    ctx: RuntimeContext,
}

impl<'a> SecretResolver<'a> {
    /// Creates a resolver over `env` for the given context
    pub fn new(env: &'a EnvSnapshot, ctx: RuntimeContext) -> Self {
        Self { env, ctx }
    }

    /// Resolves one secret
    ///
    /// Returns `None` only in production under [`SecretPolicy::FailFast`]
    /// when the variable is missing; an error diagnostic is pushed in that
    /// case so the caller can refuse to start.
    pub fn resolve(
        &self,
        request: &SecretRequest,
        diagnostics: &mut Diagnostics,
    ) -> Option<ResolvedSecret> {
        if let Some(value) = self.env.get(request.var) {
            return Some(ResolvedSecret::from_env(value.to_string()));
        }

        let fallback = Fallback::for_context(&self.ctx);
        let message = match fallback {
            Fallback::Generate => format!(
                "{} is not set; generated an ephemeral secret for {}",
                request.var, request.purpose
            ),
            Fallback::GenerateWithWarning => format!(
                "{} is not set; generated a temporary secret for {}. This is NOT secure for \
                 production, sessions and tokens will be invalidated on every restart",
                request.var, request.purpose
            ),
            Fallback::Refuse => format!(
                "{} is not set; refusing to generate a secret for {} in production",
                request.var, request.purpose
            ),
        };
        diagnostics
            .push(Diagnostic::new(fallback.severity(), "secrets", message).with_var(request.var));

        match fallback {
            Fallback::Refuse => None,
            Fallback::Generate | Fallback::GenerateWithWarning => {
                Some(ResolvedSecret::generated())
            }
        }
    }
}
