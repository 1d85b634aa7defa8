//! Post-assembly production checks
//!
//! Runs once after the configuration is assembled. In development it only
//! reports the mode. In production it emits exactly one diagnostic per
//! check and never fails the process itself; the host decides what an
//! error-class finding means.

use crate::config::mode::RuntimeMode;
use crate::config::{DatabaseClient, EnvSnapshot};
use crate::core::database::{
    select_client, DATABASE_CLIENT_VAR, DATABASE_HOST_VAR, DATABASE_URL_VAR,
};
use crate::core::server::APP_KEYS_VAR;
use crate::domain::diagnostics::{Diagnostic, Diagnostics, Severity};
use url::Url;

const COMPONENT: &str = "bootstrap";

/// Validates the deployment for the given mode
pub fn validate(env: &EnvSnapshot, mode: RuntimeMode) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    if !mode.is_production() {
        diagnostics.info(COMPONENT, "Running in development mode");
        return diagnostics;
    }

    diagnostics.info(COMPONENT, "Running in production mode");
    diagnostics.push(check_database_source(env));
    diagnostics.push(check_app_keys(env));
    diagnostics
}

// Judged against the driver the database builder will select.
fn check_database_source(env: &EnvSnapshot) -> Diagnostic {
    let client = match select_client(env) {
        Ok(client) => client,
        Err(e) => {
            return Diagnostic::new(Severity::Error, COMPONENT, e.to_string())
                .with_var(DATABASE_CLIENT_VAR);
        }
    };

    match client {
        DatabaseClient::Postgres => match env.get(DATABASE_URL_VAR) {
            Some(raw) => check_database_url(raw),
            None => check_database_host(env, client, "set DATABASE_URL or DATABASE_HOST"),
        },
        DatabaseClient::Mysql => check_database_host(env, client, "set DATABASE_HOST"),
        DatabaseClient::Sqlite if env.is_set(DATABASE_CLIENT_VAR) => {
            Diagnostic::new(Severity::Info, COMPONENT, "SQLite database selected explicitly")
                .with_var(DATABASE_CLIENT_VAR)
        }
        DatabaseClient::Sqlite => {
            let message = if env.is_set(DATABASE_HOST_VAR) {
                "DATABASE_HOST is set but no driver is selected; falling back to a local \
                 SQLite file: set DATABASE_CLIENT or DATABASE_URL"
            } else {
                "No database source configured: set DATABASE_URL, or DATABASE_CLIENT \
                 with DATABASE_HOST"
            };
            Diagnostic::new(Severity::Error, COMPONENT, message).with_var(DATABASE_CLIENT_VAR)
        }
    }
}

fn check_database_url(raw: &str) -> Diagnostic {
    match Url::parse(raw) {
        Ok(_) => Diagnostic::new(Severity::Info, COMPONENT, "Database URL configured"),
        // The parse error is safe to print; the URL itself is not.
        Err(e) => Diagnostic::new(
            Severity::Error,
            COMPONENT,
            format!("DATABASE_URL is not a valid URL: {e}"),
        ),
    }
    .with_var(DATABASE_URL_VAR)
}

fn check_database_host(env: &EnvSnapshot, client: DatabaseClient, hint: &str) -> Diagnostic {
    if env.is_set(DATABASE_HOST_VAR) {
        Diagnostic::new(
            Severity::Info,
            COMPONENT,
            format!("Database host configured for {client}"),
        )
    } else {
        Diagnostic::new(
            Severity::Error,
            COMPONENT,
            format!("No database host configured for {client}: {hint}"),
        )
    }
    .with_var(DATABASE_HOST_VAR)
}

fn check_app_keys(env: &EnvSnapshot) -> Diagnostic {
    let diagnostic = if env.array(APP_KEYS_VAR, &[]).is_empty() {
        Diagnostic::new(
            Severity::Warning,
            COMPONENT,
            "APP_KEYS is not set; sessions will not survive a restart",
        )
    } else {
        Diagnostic::new(Severity::Info, COMPONENT, "APP_KEYS configured")
    };
    diagnostic.with_var(APP_KEYS_VAR)
}
