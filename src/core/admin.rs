//! Admin panel section: admin secrets and UI feature flags

use crate::config::mode::RuntimeContext;
use crate::config::schema::{AdminConfig, AdminFlags};
use crate::config::EnvSnapshot;
use crate::core::secrets::{
    SecretResolver, ADMIN_JWT_SECRET, API_TOKEN_SALT, ENCRYPTION_KEY, TRANSFER_TOKEN_SALT,
};
use crate::domain::diagnostics::{Built, Diagnostics};
use crate::domain::result::Result;

/// Builds the admin section
///
/// The four admin secrets go through [`SecretResolver`] so they share the
/// production policy with `JWT_SECRET` and `APP_KEYS`. `FLAG_NPS` and
/// `FLAG_PROMOTE_EE` default to `true`.
pub fn build_admin_config(env: &EnvSnapshot, ctx: &RuntimeContext) -> Result<Built<AdminConfig>> {
    let flags = AdminFlags {
        nps: env.bool("FLAG_NPS", true)?,
        promote_ee: env.bool("FLAG_PROMOTE_EE", true)?,
    };

    let resolver = SecretResolver::new(env, *ctx);
    let mut diagnostics = Diagnostics::new();

    let config = AdminConfig {
        auth_secret: resolver.resolve(&ADMIN_JWT_SECRET, &mut diagnostics),
        api_token_salt: resolver.resolve(&API_TOKEN_SALT, &mut diagnostics),
        transfer_token_salt: resolver.resolve(&TRANSFER_TOKEN_SALT, &mut diagnostics),
        encryption_key: resolver.resolve(&ENCRYPTION_KEY, &mut diagnostics),
        flags,
    };

    Ok(Built::new(config, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::mode::SecretPolicy;
    use crate::domain::diagnostics::Severity;
    use secrecy::ExposeSecret;

    fn full_env() -> EnvSnapshot {
        EnvSnapshot::from_pairs([
            ("ADMIN_JWT_SECRET", "admin"),
            ("API_TOKEN_SALT", "api"),
            ("TRANSFER_TOKEN_SALT", "transfer"),
            ("ENCRYPTION_KEY", "enc"),
        ])
    }

    #[test]
    fn test_all_secrets_from_env() {
        let ctx = RuntimeContext::production(SecretPolicy::FailFast);
        let built = build_admin_config(&full_env(), &ctx).unwrap();
        let config = built.value;

        assert_eq!(config.auth_secret.unwrap().value.expose_secret(), "admin");
        assert_eq!(config.api_token_salt.unwrap().value.expose_secret(), "api");
        assert_eq!(
            config.transfer_token_salt.unwrap().value.expose_secret(),
            "transfer"
        );
        assert_eq!(config.encryption_key.unwrap().value.expose_secret(), "enc");
        assert!(built.diagnostics.is_empty());
    }

    #[test]
    fn test_flags_default_true() {
        let built = build_admin_config(&full_env(), &RuntimeContext::development()).unwrap();
        assert_eq!(
            built.value.flags,
            AdminFlags {
                nps: true,
                promote_ee: true
            }
        );
    }

    #[test]
    fn test_flags_from_env() {
        let env = EnvSnapshot::from_pairs([("FLAG_NPS", "false"), ("FLAG_PROMOTE_EE", "0")]);
        let built = build_admin_config(&env, &RuntimeContext::development()).unwrap();
        assert!(!built.value.flags.nps);
        assert!(!built.value.flags.promote_ee);
    }

    #[test]
    fn test_malformed_flag_is_an_error() {
        let env = EnvSnapshot::from_pairs([("FLAG_NPS", "sometimes")]);
        let err = build_admin_config(&env, &RuntimeContext::development()).unwrap_err();
        assert!(err.to_string().contains("FLAG_NPS"));
    }

    #[test]
    fn test_fail_fast_refuses_every_missing_secret() {
        let ctx = RuntimeContext::production(SecretPolicy::FailFast);
        let built = build_admin_config(&EnvSnapshot::default(), &ctx).unwrap();

        assert!(built.value.auth_secret.is_none());
        assert!(built.value.api_token_salt.is_none());
        assert!(built.value.transfer_token_salt.is_none());
        assert!(built.value.encryption_key.is_none());
        assert_eq!(built.diagnostics.count(Severity::Error), 4);
    }

    #[test]
    fn test_generate_policy_applies_to_every_missing_secret() {
        let env = EnvSnapshot::from_pairs([("ADMIN_JWT_SECRET", "admin")]);
        let ctx = RuntimeContext::production(SecretPolicy::GenerateWithWarning);
        let built = build_admin_config(&env, &ctx).unwrap();

        assert!(!built.value.auth_secret.unwrap().is_ephemeral());
        assert!(built.value.encryption_key.unwrap().is_ephemeral());
        assert_eq!(built.diagnostics.count(Severity::Warning), 3);
    }
}
