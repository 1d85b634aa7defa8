//! Database section: driver selection and connection descriptors
//!
//! Driver selection:
//! - `DATABASE_CLIENT`, when set, decides outright
//! - otherwise `postgres` when `DATABASE_URL` is set, else `sqlite`
//!
//! | Variable | Effect | Default |
//! |---|---|---|
//! | `DATABASE_URL` | full PostgreSQL connection string | none |
//! | `DATABASE_HOST` / `PORT` / `NAME` / `USERNAME` / `PASSWORD` | discrete parameters | `localhost` / 5432 or 3306 / `strapi` ×3 |
//! | `DATABASE_SCHEMA` | PostgreSQL schema | `public` |
//! | `DATABASE_SSL`, `DATABASE_SSL_*` | TLS for discrete connections | disabled |
//! | `DATABASE_POOL_MIN` / `MAX` | pool bounds | 2 / 10 |
//! | `DATABASE_CONNECTION_TIMEOUT` | acquire timeout in ms | 60000 |
//! | `DATABASE_FILENAME` | SQLite file under the application root | `.tmp/data.db` |
//!
//! When PostgreSQL is configured through `DATABASE_URL`, the discrete
//! variables are never read.

use crate::config::schema::{
    ConnectionDescriptor, DatabaseClient, DiscreteConnection, PoolConfig, TlsOptions,
    DEFAULT_ACQUIRE_TIMEOUT_MS, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD,
    DEFAULT_DB_SCHEMA, DEFAULT_DB_USER, DEFAULT_MYSQL_PORT, DEFAULT_POOL_MAX, DEFAULT_POOL_MIN,
    DEFAULT_POSTGRES_PORT, DEFAULT_SQLITE_FILENAME,
};
use crate::config::secret::{secret_string, secret_string_opt};
use crate::config::EnvSnapshot;
use crate::core::connection::{mask_database_url, normalize_database_url};
use crate::domain::diagnostics::{Built, Diagnostics};
use crate::domain::errors::{BootstrapError, EnvError};
use crate::domain::result::Result;
use std::path::Path;

/// Variable holding the full connection URL
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Variable holding the host for discrete parameters
pub const DATABASE_HOST_VAR: &str = "DATABASE_HOST";

/// Variable overriding driver selection
pub const DATABASE_CLIENT_VAR: &str = "DATABASE_CLIENT";

const COMPONENT: &str = "database";

/// Picks the driver for this environment
pub fn select_client(env: &EnvSnapshot) -> std::result::Result<DatabaseClient, EnvError> {
    match env.get(DATABASE_CLIENT_VAR) {
        Some(raw) => DatabaseClient::parse_env(DATABASE_CLIENT_VAR, raw),
        None if env.is_set(DATABASE_URL_VAR) => Ok(DatabaseClient::Postgres),
        None => Ok(DatabaseClient::Sqlite),
    }
}

/// Builds the connection descriptor
///
/// `app_root` anchors relative SQLite paths.
pub fn build_database_config(
    env: &EnvSnapshot,
    app_root: &Path,
) -> Result<Built<ConnectionDescriptor>> {
    let mut diagnostics = Diagnostics::new();
    let client = select_client(env)?;
    diagnostics.info(COMPONENT, format!("Database client: {client}"));

    let descriptor = match client {
        DatabaseClient::Postgres => {
            match normalize_database_url(env.get(DATABASE_URL_VAR)) {
                Some(url) => {
                    diagnostics.info(COMPONENT, "Using DATABASE_URL for PostgreSQL connection");
                    diagnostics.info(
                        COMPONENT,
                        format!("Database URL: {}", mask_database_url(&url)),
                    );
                    ConnectionDescriptor::PostgresUrl {
                        connection_string: secret_string(url),
                        pool: pool_config(env)?,
                    }
                }
                None => {
                    diagnostics.info(
                        COMPONENT,
                        "Using individual connection parameters for PostgreSQL",
                    );
                    ConnectionDescriptor::PostgresParts {
                        connection: discrete_connection(env, DEFAULT_POSTGRES_PORT)?,
                        schema: env.string("DATABASE_SCHEMA", DEFAULT_DB_SCHEMA),
                        pool: pool_config(env)?,
                    }
                }
            }
        }
        DatabaseClient::Mysql => ConnectionDescriptor::Mysql {
            connection: discrete_connection(env, DEFAULT_MYSQL_PORT)?,
            pool: pool_config(env)?,
        },
        DatabaseClient::Sqlite => ConnectionDescriptor::Sqlite {
            filename: app_root.join(env.string("DATABASE_FILENAME", DEFAULT_SQLITE_FILENAME)),
            use_null_as_default: true,
        },
    };

    Ok(Built::new(descriptor, diagnostics))
}

fn discrete_connection(env: &EnvSnapshot, default_port: u16) -> Result<DiscreteConnection> {
    let ssl = if env.bool("DATABASE_SSL", false)? {
        Some(TlsOptions {
            key: secret_string_opt(env.optional("DATABASE_SSL_KEY")),
            cert: env.optional("DATABASE_SSL_CERT"),
            ca: env.optional("DATABASE_SSL_CA"),
            capath: env.optional("DATABASE_SSL_CAPATH"),
            cipher: env.optional("DATABASE_SSL_CIPHER"),
            reject_unauthorized: env.bool("DATABASE_SSL_REJECT_UNAUTHORIZED", true)?,
        })
    } else {
        None
    };

    Ok(DiscreteConnection {
        host: env.string(DATABASE_HOST_VAR, DEFAULT_DB_HOST),
        port: env.int("DATABASE_PORT", default_port)?,
        database: env.string("DATABASE_NAME", DEFAULT_DB_NAME),
        user: env.string("DATABASE_USERNAME", DEFAULT_DB_USER),
        password: secret_string(env.string("DATABASE_PASSWORD", DEFAULT_DB_PASSWORD)),
        ssl,
    })
}

fn pool_config(env: &EnvSnapshot) -> Result<PoolConfig> {
    let pool = PoolConfig {
        min: env.int("DATABASE_POOL_MIN", DEFAULT_POOL_MIN)?,
        max: env.int("DATABASE_POOL_MAX", DEFAULT_POOL_MAX)?,
        acquire_timeout_ms: env.int("DATABASE_CONNECTION_TIMEOUT", DEFAULT_ACQUIRE_TIMEOUT_MS)?,
    };

    if pool.max == 0 {
        return Err(EnvError::OutOfRange {
            var: "DATABASE_POOL_MAX".to_string(),
            reason: "pool must allow at least one connection".to_string(),
        }
        .into());
    }
    if pool.min > pool.max {
        return Err(BootstrapError::Configuration(format!(
            "DATABASE_POOL_MIN ({}) cannot exceed DATABASE_POOL_MAX ({})",
            pool.min, pool.max
        )));
    }
    if pool.acquire_timeout_ms == 0 {
        return Err(EnvError::OutOfRange {
            var: "DATABASE_CONNECTION_TIMEOUT".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        }
        .into());
    }

    Ok(pool)
}
