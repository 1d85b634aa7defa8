//! Plugins section: REST and GraphQL pagination, users & permissions
//!
//! | Variable | Effect | Default |
//! |---|---|---|
//! | `REST_DEFAULT_LIMIT` / `REST_MAX_LIMIT` | REST page sizes | 25 / 100 |
//! | `REST_WITH_COUNT` | always return totals | true |
//! | `GRAPHQL_ENABLED` | enable the GraphQL plugin | false |
//! | `GRAPHQL_DEFAULT_LIMIT` / `GRAPHQL_MAX_LIMIT` | GraphQL page sizes | 10 / 20 |
//! | `JWT_SECRET` | end-user token signing | resolved by policy |
//!
//! GraphQL limits are only read when the plugin is enabled.

use crate::config::mode::RuntimeContext;
use crate::config::schema::{
    PaginationLimits, PluginsConfig, RestConfig, UsersPermissionsConfig, DEFAULT_GRAPHQL_LIMIT,
    DEFAULT_GRAPHQL_MAX_LIMIT, DEFAULT_REST_LIMIT, DEFAULT_REST_MAX_LIMIT,
};
use crate::config::EnvSnapshot;
use crate::core::secrets::{SecretResolver, JWT_SECRET};
use crate::domain::diagnostics::{Built, Diagnostics};
use crate::domain::errors::BootstrapError;
use crate::domain::result::Result;

/// Variable toggling the GraphQL plugin
pub const GRAPHQL_ENABLED_VAR: &str = "GRAPHQL_ENABLED";

const COMPONENT: &str = "plugins";

/// Builds the plugins section
pub fn build_plugins_config(
    env: &EnvSnapshot,
    ctx: &RuntimeContext,
) -> Result<Built<PluginsConfig>> {
    let mut diagnostics = Diagnostics::new();

    let rest = RestConfig {
        limits: pagination(
            env,
            ("REST_DEFAULT_LIMIT", DEFAULT_REST_LIMIT),
            ("REST_MAX_LIMIT", DEFAULT_REST_MAX_LIMIT),
        )?,
        with_count: env.bool("REST_WITH_COUNT", true)?,
    };

    let graphql = if env.bool(GRAPHQL_ENABLED_VAR, false)? {
        let limits = pagination(
            env,
            ("GRAPHQL_DEFAULT_LIMIT", DEFAULT_GRAPHQL_LIMIT),
            ("GRAPHQL_MAX_LIMIT", DEFAULT_GRAPHQL_MAX_LIMIT),
        )?;
        diagnostics.info(
            COMPONENT,
            format!(
                "GraphQL enabled (default limit {}, max limit {})",
                limits.default_limit, limits.max_limit
            ),
        );
        Some(limits)
    } else {
        None
    };

    let jwt_secret = SecretResolver::new(env, *ctx).resolve(&JWT_SECRET, &mut diagnostics);

    Ok(Built::new(
        PluginsConfig {
            rest,
            graphql,
            users_permissions: UsersPermissionsConfig { jwt_secret },
        },
        diagnostics,
    ))
}

fn pagination(
    env: &EnvSnapshot,
    (default_var, default_value): (&str, u32),
    (max_var, max_value): (&str, u32),
) -> Result<PaginationLimits> {
    let limits = PaginationLimits {
        default_limit: env.int(default_var, default_value)?,
        max_limit: env.int(max_var, max_value)?,
    };

    if limits.default_limit == 0 || limits.max_limit == 0 {
        return Err(BootstrapError::Configuration(format!(
            "{default_var} and {max_var} must be greater than zero"
        )));
    }
    if limits.default_limit > limits.max_limit {
        return Err(BootstrapError::Configuration(format!(
            "{default_var} ({}) cannot exceed {max_var} ({})",
            limits.default_limit, limits.max_limit
        )));
    }

    Ok(limits)
}
