//! Server section: bind address, port and application keys
//!
//! | Variable | Effect | Default |
//! |---|---|---|
//! | `HOST` | bind address | `0.0.0.0` |
//! | `PORT` | bind port, 1..=65535 | `1337` |
//! | `APP_KEYS` | comma-separated signing keys | see below |
//!
//! When `APP_KEYS` is empty, development gets four fixed placeholder keys.
//! Production follows the same [`SecretPolicy`](crate::config::SecretPolicy)
//! as every other secret: either four generated keys and a warning, or an
//! empty set and an error.

use crate::config::mode::RuntimeContext;
use crate::config::schema::{
    AppKeySet, AppKeySource, ServerConfig, APP_KEY_COUNT, DEFAULT_HOST, DEFAULT_PORT, DEV_APP_KEYS,
};
use crate::config::secret::{generate_secret, secret_string};
use crate::config::EnvSnapshot;
use crate::core::secrets::Fallback;
use crate::domain::diagnostics::{Built, Diagnostic, Diagnostics};
use crate::domain::errors::EnvError;
use crate::domain::result::Result;

/// Variable holding the application keys
pub const APP_KEYS_VAR: &str = "APP_KEYS";

const COMPONENT: &str = "server";

/// Builds the server section
pub fn build_server_config(env: &EnvSnapshot, ctx: &RuntimeContext) -> Result<Built<ServerConfig>> {
    let mut diagnostics = Diagnostics::new();

    let port = resolve_port(env)?;
    let host = env.string("HOST", DEFAULT_HOST);
    let app_keys = resolve_app_keys(env, ctx, &mut diagnostics);

    Ok(Built::new(
        ServerConfig {
            host,
            port,
            app_keys,
        },
        diagnostics,
    ))
}

/// Reads `PORT`, rejecting non-numeric values and zero
///
/// Platform-injected `PORT` values take precedence over `.env` files because
/// the loader never overrides existing variables.
pub fn resolve_port(env: &EnvSnapshot) -> std::result::Result<u16, EnvError> {
    let port: u16 = env.int("PORT", DEFAULT_PORT)?;
    if port == 0 {
        return Err(EnvError::OutOfRange {
            var: "PORT".to_string(),
            reason: "port must be between 1 and 65535".to_string(),
        });
    }
    Ok(port)
}

fn resolve_app_keys(
    env: &EnvSnapshot,
    ctx: &RuntimeContext,
    diagnostics: &mut Diagnostics,
) -> AppKeySet {
    let configured = env.array(APP_KEYS_VAR, &[]);
    if !configured.is_empty() {
        return AppKeySet {
            keys: configured.into_iter().map(secret_string).collect(),
            source: AppKeySource::Environment,
        };
    }

    let fallback = Fallback::for_context(ctx);
    let (set, message) = match fallback {
        Fallback::Generate => (
            AppKeySet {
                keys: DEV_APP_KEYS
                    .iter()
                    .map(|key| secret_string(key.to_string()))
                    .collect(),
                source: AppKeySource::Placeholder,
            },
            "APP_KEYS is not set; using development placeholder keys".to_string(),
        ),
        Fallback::GenerateWithWarning => (
            AppKeySet {
                keys: (0..APP_KEY_COUNT).map(|_| generate_secret()).collect(),
                source: AppKeySource::Generated,
            },
            format!(
                "APP_KEYS is not set; generated {APP_KEY_COUNT} temporary keys. This is NOT \
                 secure for production, sessions will be invalidated on every restart"
            ),
        ),
        Fallback::Refuse => (
            AppKeySet {
                keys: Vec::new(),
                source: AppKeySource::Missing,
            },
            "APP_KEYS is not set; the server cannot sign sessions in production".to_string(),
        ),
    };

    diagnostics
        .push(Diagnostic::new(fallback.severity(), COMPONENT, message).with_var(APP_KEYS_VAR));
    set
}
