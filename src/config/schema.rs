//! Configuration schema types
//!
//! This module defines the configuration sections handed to the host
//! framework. Every section is built fresh from an
//! [`EnvSnapshot`](super::EnvSnapshot) at startup and never mutated after.

use crate::config::secret::{ResolvedSecret, SecretString};
use crate::domain::errors::EnvError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port
pub const DEFAULT_PORT: u16 = 1337;
/// Placeholder application keys used in development
pub const DEV_APP_KEYS: [&str; 4] = ["dev-key-1", "dev-key-2", "dev-key-3", "dev-key-4"];
/// Number of application keys generated when none are configured
pub const APP_KEY_COUNT: usize = 4;

/// Default database host
pub const DEFAULT_DB_HOST: &str = "localhost";
/// Default PostgreSQL port
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;
/// Default MySQL port
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
/// Default database name, user and password
pub const DEFAULT_DB_NAME: &str = "strapi";
/// Default database user
pub const DEFAULT_DB_USER: &str = "strapi";
/// Default database password
pub const DEFAULT_DB_PASSWORD: &str = "strapi";
/// Default PostgreSQL schema
pub const DEFAULT_DB_SCHEMA: &str = "public";
/// Default SQLite file, relative to the application root
pub const DEFAULT_SQLITE_FILENAME: &str = ".tmp/data.db";
/// Default minimum pool size
pub const DEFAULT_POOL_MIN: u32 = 2;
/// Default maximum pool size
pub const DEFAULT_POOL_MAX: u32 = 10;
/// Default connection acquire timeout in milliseconds
pub const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 60_000;

/// Default REST page size
pub const DEFAULT_REST_LIMIT: u32 = 25;
/// Hard cap on REST page size
pub const DEFAULT_REST_MAX_LIMIT: u32 = 100;
/// Default GraphQL page size
pub const DEFAULT_GRAPHQL_LIMIT: u32 = 10;
/// Hard cap on GraphQL page size
pub const DEFAULT_GRAPHQL_MAX_LIMIT: u32 = 20;

/// Server section
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Session/cookie signing keys
    pub app_keys: AppKeySet,
}

/// Where the application keys came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKeySource {
    /// `APP_KEYS` was set
    Environment,
    /// Fixed development placeholders
    Placeholder,
    /// Generated for this process only
    Generated,
    /// Refused under the fail-fast policy; the set is empty
    Missing,
}

/// Ordered application keys
#[derive(Debug, Clone)]
pub struct AppKeySet {
    /// The keys, in configured order
    pub keys: Vec<SecretString>,

    /// Where they came from
    pub source: AppKeySource,
}

impl AppKeySet {
    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty; the host cannot sign sessions in that case
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Database driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseClient {
    /// PostgreSQL
    Postgres,
    /// MySQL / MariaDB
    Mysql,
    /// SQLite file
    Sqlite,
}

impl DatabaseClient {
    /// Parses the `DATABASE_CLIENT` value
    pub fn parse_env(var: &str, raw: &str) -> Result<Self, EnvError> {
        raw.parse().map_err(|_| EnvError::InvalidChoice {
            var: var.to_string(),
            value: raw.to_string(),
            expected: "postgres, mysql, sqlite".to_string(),
        })
    }
}

impl FromStr for DatabaseClient {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DatabaseClient::Postgres),
            "mysql" => Ok(DatabaseClient::Mysql),
            "sqlite" => Ok(DatabaseClient::Sqlite),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DatabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseClient::Postgres => write!(f, "postgres"),
            DatabaseClient::Mysql => write!(f, "mysql"),
            DatabaseClient::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// TLS options for discrete database connections
#[derive(Debug, Clone)]
pub struct TlsOptions {
    /// Client private key
    pub key: Option<SecretString>,
    /// Client certificate
    pub cert: Option<String>,
    /// CA certificate
    pub ca: Option<String>,
    /// CA directory
    pub capath: Option<String>,
    /// Cipher list
    pub cipher: Option<String>,
    /// Reject servers whose certificate does not verify
    pub reject_unauthorized: bool,
}

/// Host/port/credential connection parameters
#[derive(Debug, Clone)]
pub struct DiscreteConnection {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database name
    pub database: String,
    /// User name
    pub user: String,
    /// Password
    pub password: SecretString,
    /// TLS sub-configuration, `None` when TLS is disabled
    pub ssl: Option<TlsOptions>,
}

/// Connection pool bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolConfig {
    /// Minimum open connections
    pub min: u32,
    /// Maximum open connections
    pub max: u32,
    /// Time to wait for a free connection, in milliseconds
    pub acquire_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_POOL_MIN,
            max: DEFAULT_POOL_MAX,
            acquire_timeout_ms: DEFAULT_ACQUIRE_TIMEOUT_MS,
        }
    }
}

/// Driver-specific connection parameters
#[derive(Debug, Clone)]
pub enum ConnectionDescriptor {
    /// MySQL with discrete parameters
    Mysql {
        connection: DiscreteConnection,
        pool: PoolConfig,
    },
    /// PostgreSQL via a full connection string
    PostgresUrl {
        connection_string: SecretString,
        pool: PoolConfig,
    },
    /// PostgreSQL with discrete parameters
    PostgresParts {
        connection: DiscreteConnection,
        schema: String,
        pool: PoolConfig,
    },
    /// SQLite file; no pool
    Sqlite {
        filename: PathBuf,
        use_null_as_default: bool,
    },
}

impl ConnectionDescriptor {
    /// Driver of this descriptor
    pub fn client(&self) -> DatabaseClient {
        match self {
            ConnectionDescriptor::Mysql { .. } => DatabaseClient::Mysql,
            ConnectionDescriptor::PostgresUrl { .. }
            | ConnectionDescriptor::PostgresParts { .. } => DatabaseClient::Postgres,
            ConnectionDescriptor::Sqlite { .. } => DatabaseClient::Sqlite,
        }
    }

    /// Pool bounds; `None` for SQLite
    pub fn pool(&self) -> Option<&PoolConfig> {
        match self {
            ConnectionDescriptor::Mysql { pool, .. }
            | ConnectionDescriptor::PostgresUrl { pool, .. }
            | ConnectionDescriptor::PostgresParts { pool, .. } => Some(pool),
            ConnectionDescriptor::Sqlite { .. } => None,
        }
    }
}

/// Admin panel section
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Admin JWT signing secret
    pub auth_secret: Option<ResolvedSecret>,
    /// API token salt
    pub api_token_salt: Option<ResolvedSecret>,
    /// Transfer token salt
    pub transfer_token_salt: Option<ResolvedSecret>,
    /// Field encryption key
    pub encryption_key: Option<ResolvedSecret>,
    /// Admin UI feature flags
    pub flags: AdminFlags,
}

/// Admin UI feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminFlags {
    /// Show the satisfaction survey
    pub nps: bool,
    /// Show enterprise edition promotions
    pub promote_ee: bool,
}

/// Pagination limits for an API surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationLimits {
    /// Page size when the client does not ask for one
    pub default_limit: u32,
    /// Largest page size a client may request
    pub max_limit: u32,
}

/// REST plugin settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestConfig {
    /// Page size limits
    #[serde(flatten)]
    pub limits: PaginationLimits,
    /// Always return total counts
    pub with_count: bool,
}

/// Users & permissions plugin settings
#[derive(Debug, Clone)]
pub struct UsersPermissionsConfig {
    /// End-user JWT signing secret
    pub jwt_secret: Option<ResolvedSecret>,
}

/// Plugins section
#[derive(Debug, Clone)]
pub struct PluginsConfig {
    /// REST API settings
    pub rest: RestConfig,
    /// GraphQL settings; `None` when GraphQL is disabled
    pub graphql: Option<PaginationLimits>,
    /// Users & permissions settings
    pub users_permissions: UsersPermissionsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Emit JSON lines on the console instead of human-readable text
    pub json: bool,

    /// Directory for rolling JSON log files; `None` disables file logging
    pub local_path: Option<String>,

    /// Rotation schedule for file logs (daily, hourly, never)
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            local_path: None,
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
