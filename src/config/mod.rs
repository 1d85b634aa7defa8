//! Configuration primitives.
//!
//! This module provides the environment snapshot, runtime mode, secret
//! handling and the schema types for every configuration section.
//!
//! # Overview
//!
//! Configuration is derived from environment variables only:
//! - An optional `.env` file is loaded once ([`load_environment`])
//! - The environment is frozen into an [`EnvSnapshot`]
//! - [`RuntimeContext`] selects development or production behaviour
//! - Builders in [`crate::core`] turn the snapshot into schema types
//!
//! # Quick Start
//!
//! ```rust
//! use cms_bootstrap::config::{EnvSnapshot, RuntimeContext, RuntimeMode};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = EnvSnapshot::from_pairs([("NODE_ENV", "production")]);
//! let ctx = RuntimeContext::from_env(&env)?;
//! assert_eq!(ctx.mode, RuntimeMode::Production);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Effect | Default |
//! |---|---|---|
//! | `NODE_ENV` | runtime mode | development |
//! | `SECRET_POLICY` | `fail-fast` or `generate` for missing production secrets | fail-fast |
//! | `LOG_FORMAT` / `LOG_DIR` / `LOG_ROTATION` | logging output | text / none / daily |
//!
//! Section-specific variables are documented on each builder.

pub mod env;
pub mod loader;
pub mod mode;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use env::EnvSnapshot;
pub use loader::{load_environment, logging_config};
pub use mode::{RuntimeContext, RuntimeMode, SecretPolicy};
pub use schema::{
    AdminConfig, AdminFlags, AppKeySet, AppKeySource, ConnectionDescriptor, DatabaseClient,
    DiscreteConnection, LoggingConfig, PaginationLimits, PluginsConfig, PoolConfig, RestConfig,
    ServerConfig, TlsOptions, UsersPermissionsConfig,
};
pub use secret::{
    fingerprint, generate_secret, generate_secret_with_len, secret_string, secret_string_opt,
    ResolvedSecret, SecretSource, SecretString, SecretValue,
};
