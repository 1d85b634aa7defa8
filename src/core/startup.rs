//! Startup assembly
//!
//! [`assemble`] derives the runtime context from a snapshot and runs every
//! section builder in order. The resulting [`StartupReport`] owns the
//! assembled configuration plus every diagnostic produced along the way,
//! ready to be emitted through a single sink.

use crate::config::mode::{RuntimeContext, RuntimeMode, SecretPolicy};
use crate::config::schema::{
    AdminConfig, AdminFlags, AppKeySource, ConnectionDescriptor, DatabaseClient, PaginationLimits,
    PluginsConfig, PoolConfig, RestConfig, ServerConfig,
};
use crate::config::secret::{ResolvedSecret, SecretSource};
use crate::config::EnvSnapshot;
use crate::core::admin::build_admin_config;
use crate::core::connection::{mask_database_url, requires_tls};
use crate::core::database::build_database_config;
use crate::core::plugins::build_plugins_config;
use crate::core::secrets::{
    ADMIN_JWT_SECRET, API_TOKEN_SALT, ENCRYPTION_KEY, JWT_SECRET, TRANSFER_TOKEN_SALT,
};
use crate::core::server::{build_server_config, APP_KEYS_VAR};
use crate::domain::diagnostics::Diagnostics;
use crate::domain::errors::BootstrapError;
use crate::domain::result::Result;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::path::Path;

/// Everything assembled during one startup
#[derive(Debug)]
pub struct StartupReport {
    /// Mode and secret policy in effect
    pub context: RuntimeContext,
    /// Server section
    pub server: ServerConfig,
    /// Database section
    pub database: ConnectionDescriptor,
    /// Admin section
    pub admin: AdminConfig,
    /// Plugins section
    pub plugins: PluginsConfig,
    /// Diagnostics from every builder, in build order
    pub diagnostics: Diagnostics,
}

/// Assembles the full configuration from a snapshot
///
/// # Errors
///
/// Returns an error when any variable is malformed. Refused secrets are not
/// errors here; see [`StartupReport::ensure_ready`].
pub fn assemble(env: &EnvSnapshot, app_root: &Path) -> Result<StartupReport> {
    let context = RuntimeContext::from_env(env)?;

    let mut diagnostics = Diagnostics::new();
    diagnostics.info(
        "startup",
        format!(
            "Runtime mode: {} (secret policy: {})",
            context.mode, context.secret_policy
        ),
    );

    let server = build_server_config(env, &context)?;
    diagnostics.extend(server.diagnostics);

    let database = build_database_config(env, app_root)?;
    diagnostics.extend(database.diagnostics);

    let admin = build_admin_config(env, &context)?;
    diagnostics.extend(admin.diagnostics);

    let plugins = build_plugins_config(env, &context)?;
    diagnostics.extend(plugins.diagnostics);

    Ok(StartupReport {
        context,
        server: server.value,
        database: database.value,
        admin: admin.value,
        plugins: plugins.value,
        diagnostics,
    })
}

impl StartupReport {
    /// Every single-value secret with the variable it came from
    pub fn secrets(&self) -> [(&'static str, Option<&ResolvedSecret>); 5] {
        [
            (ADMIN_JWT_SECRET.var, self.admin.auth_secret.as_ref()),
            (API_TOKEN_SALT.var, self.admin.api_token_salt.as_ref()),
            (TRANSFER_TOKEN_SALT.var, self.admin.transfer_token_salt.as_ref()),
            (ENCRYPTION_KEY.var, self.admin.encryption_key.as_ref()),
            (JWT_SECRET.var, self.plugins.users_permissions.jwt_secret.as_ref()),
        ]
    }

    /// Variables that were refused under the fail-fast policy
    pub fn missing_secrets(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.server.app_keys.source == AppKeySource::Missing {
            missing.push(APP_KEYS_VAR.to_string());
        }
        missing.extend(
            self.secrets()
                .into_iter()
                .filter(|(_, secret)| secret.is_none())
                .map(|(var, _)| var.to_string()),
        );
        missing
    }

    /// Fails when any secret was refused
    pub fn ensure_ready(&self) -> Result<()> {
        let vars = self.missing_secrets();
        if vars.is_empty() {
            Ok(())
        } else {
            Err(BootstrapError::MissingSecrets { vars })
        }
    }

    /// Printable summary with every secret masked or fingerprinted
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            mode: self.context.mode,
            secret_policy: self.context.secret_policy,
            server: ServerSummary {
                host: self.server.host.clone(),
                port: self.server.port,
                app_keys: self.server.app_keys.len(),
                app_keys_source: self.server.app_keys.source,
            },
            database: DatabaseSummary::from(&self.database),
            admin_flags: self.admin.flags,
            rest: self.plugins.rest,
            graphql: self.plugins.graphql,
            secrets: self
                .secrets()
                .into_iter()
                .map(|(var, secret)| SecretSummary::new(var, secret))
                .collect(),
        }
    }
}

/// Serializable view of the assembled configuration
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub mode: RuntimeMode,
    pub secret_policy: SecretPolicy,
    pub server: ServerSummary,
    pub database: DatabaseSummary,
    pub admin_flags: AdminFlags,
    pub rest: RestConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql: Option<PaginationLimits>,
    pub secrets: Vec<SecretSummary>,
}

/// Server section without key material
#[derive(Debug, Clone, Serialize)]
pub struct ServerSummary {
    pub host: String,
    pub port: u16,
    pub app_keys: usize,
    pub app_keys_source: AppKeySource,
}

/// Database section with the password masked
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseSummary {
    pub client: DatabaseClient,
    /// Masked URL, `user@host:port/database`, or the SQLite path
    pub connection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub ssl: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolConfig>,
}

impl From<&ConnectionDescriptor> for DatabaseSummary {
    fn from(descriptor: &ConnectionDescriptor) -> Self {
        let (connection, schema, ssl) = match descriptor {
            ConnectionDescriptor::PostgresUrl {
                connection_string, ..
            } => {
                let url = connection_string.expose_secret().as_str();
                (mask_database_url(url), None, requires_tls(url))
            }
            ConnectionDescriptor::PostgresParts {
                connection, schema, ..
            } => (
                format!(
                    "{}@{}:{}/{}",
                    connection.user, connection.host, connection.port, connection.database
                ),
                Some(schema.clone()),
                connection.ssl.is_some(),
            ),
            ConnectionDescriptor::Mysql { connection, .. } => (
                format!(
                    "{}@{}:{}/{}",
                    connection.user, connection.host, connection.port, connection.database
                ),
                None,
                connection.ssl.is_some(),
            ),
            ConnectionDescriptor::Sqlite { filename, .. } => {
                (filename.display().to_string(), None, false)
            }
        };

        Self {
            client: descriptor.client(),
            connection,
            schema,
            ssl,
            pool: descriptor.pool().copied(),
        }
    }
}

/// Where a secret came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretStatus {
    Environment,
    Generated,
    Missing,
}

/// One secret, identified by fingerprint only
#[derive(Debug, Clone, Serialize)]
pub struct SecretSummary {
    pub var: &'static str,
    pub status: SecretStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl SecretSummary {
    fn new(var: &'static str, secret: Option<&ResolvedSecret>) -> Self {
        let status = match secret.map(|s| s.source) {
            Some(SecretSource::Environment) => SecretStatus::Environment,
            Some(SecretSource::Generated) => SecretStatus::Generated,
            None => SecretStatus::Missing,
        };
        Self {
            var,
            status,
            fingerprint: secret.map(ResolvedSecret::fingerprint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::Severity;

    const ROOT: &str = "/srv/app";

    fn production_env(extra: &[(&str, &str)]) -> EnvSnapshot {
        let mut pairs = vec![
            ("NODE_ENV", "production"),
            ("DATABASE_URL", "postgres://cms:s3cr3t@db:5432/cms"),
            ("APP_KEYS", "k1,k2,k3,k4"),
            ("ADMIN_JWT_SECRET", "admin-jwt"),
            ("API_TOKEN_SALT", "api-salt"),
            ("TRANSFER_TOKEN_SALT", "transfer-salt"),
            ("ENCRYPTION_KEY", "encryption-key"),
            ("JWT_SECRET", "jwt-secret"),
        ];
        pairs.extend_from_slice(extra);
        EnvSnapshot::from_pairs(pairs)
    }

    #[test]
    fn test_development_assembles_with_defaults() {
        let report = assemble(&EnvSnapshot::default(), Path::new(ROOT)).unwrap();
        assert_eq!(report.context.mode, RuntimeMode::Development);
        assert_eq!(report.database.client(), DatabaseClient::Sqlite);
        assert!(report.missing_secrets().is_empty());
        assert!(report.ensure_ready().is_ok());
        assert!(!report.diagnostics.has_errors());
    }

    #[test]
    fn test_fully_configured_production_is_ready() {
        let report = assemble(&production_env(&[]), Path::new(ROOT)).unwrap();
        assert!(report.ensure_ready().is_ok());
        assert_eq!(report.diagnostics.count(Severity::Warning), 0);
        assert_eq!(report.diagnostics.count(Severity::Error), 0);
    }

    #[test]
    fn test_fail_fast_lists_every_missing_secret() {
        let env = EnvSnapshot::from_pairs([("NODE_ENV", "production")]);
        let report = assemble(&env, Path::new(ROOT)).unwrap();

        assert_eq!(
            report.missing_secrets(),
            vec![
                "APP_KEYS",
                "ADMIN_JWT_SECRET",
                "API_TOKEN_SALT",
                "TRANSFER_TOKEN_SALT",
                "ENCRYPTION_KEY",
                "JWT_SECRET"
            ]
        );
        assert_eq!(report.diagnostics.count(Severity::Error), 6);
        assert!(matches!(
            report.ensure_ready(),
            Err(BootstrapError::MissingSecrets { ref vars }) if vars.len() == 6
        ));
    }

    #[test]
    fn test_generate_policy_is_ready_with_warnings() {
        let env =
            EnvSnapshot::from_pairs([("NODE_ENV", "production"), ("SECRET_POLICY", "generate")]);
        let report = assemble(&env, Path::new(ROOT)).unwrap();
        assert!(report.ensure_ready().is_ok());
        assert_eq!(report.diagnostics.count(Severity::Warning), 6);
    }

    #[test]
    fn test_malformed_value_aborts_assembly() {
        let env = production_env(&[("PORT", "eighty")]);
        assert!(matches!(
            assemble(&env, Path::new(ROOT)),
            Err(BootstrapError::Env(_))
        ));
    }

    #[test]
    fn test_invalid_secret_policy_aborts_assembly() {
        let env = EnvSnapshot::from_pairs([("SECRET_POLICY", "lenient")]);
        let err = assemble(&env, Path::new(ROOT)).unwrap_err();
        assert!(err.to_string().contains("SECRET_POLICY"));
    }

    #[test]
    fn test_summary_never_contains_secret_values() {
        let report = assemble(&production_env(&[]), Path::new(ROOT)).unwrap();
        let json = serde_json::to_string(&report.summary()).unwrap();

        for value in [
            "s3cr3t",
            "k1",
            "admin-jwt",
            "api-salt",
            "transfer-salt",
            "encryption-key",
            "jwt-secret",
        ] {
            assert!(!json.contains(value), "{value} leaked: {json}");
        }
        assert!(json.contains("postgres://cms:****@db:5432/cms?sslmode=require"));
    }

    #[test]
    fn test_summary_reports_tls_only_when_mandatory() {
        for (mode, expected) in [
            ("require", true),
            ("verify-full", true),
            ("prefer", false),
            ("allow", false),
            ("disable", false),
        ] {
            let url = format!("postgres://cms:pw@db:5432/cms?sslmode={mode}");
            let env = EnvSnapshot::from_pairs([("DATABASE_URL", url.as_str())]);
            let summary = assemble(&env, Path::new(ROOT)).unwrap().summary();
            assert_eq!(summary.database.ssl, expected, "sslmode={mode}");
        }
    }

    #[test]
    fn test_summary_reports_secret_status() {
        let env = EnvSnapshot::from_pairs([("NODE_ENV", "production"), ("JWT_SECRET", "set")]);
        let summary = assemble(&env, Path::new(ROOT)).unwrap().summary();

        let jwt = summary.secrets.iter().find(|s| s.var == "JWT_SECRET").unwrap();
        assert_eq!(jwt.status, SecretStatus::Environment);
        assert!(jwt.fingerprint.is_some());

        let admin = summary
            .secrets
            .iter()
            .find(|s| s.var == "ADMIN_JWT_SECRET")
            .unwrap();
        assert_eq!(admin.status, SecretStatus::Missing);
        assert!(admin.fingerprint.is_none());
    }

    #[test]
    fn test_summary_serializes_to_toml() {
        let report = assemble(&EnvSnapshot::default(), Path::new(ROOT)).unwrap();
        let rendered = toml::to_string(&report.summary()).unwrap();
        assert!(rendered.contains("mode = \"development\""));
        assert!(rendered.contains("[database]"));
    }
}
