//! Show command implementation
//!
//! This module implements the `show` command, which prints the assembled
//! configuration with passwords masked and secrets reduced to fingerprints.

use crate::config::schema::AppKeySource;
use crate::config::EnvSnapshot;
use crate::core::reporting::{FailureReporter, EXIT_OK};
use crate::core::startup::{assemble, ConfigSummary, SecretStatus};
use crate::logging::sink::DiagnosticSink;
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::fmt::Write as _;
use std::path::Path;

/// Output format for the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// TOML document
    Toml,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute<S: DiagnosticSink>(
        &self,
        env: &EnvSnapshot,
        app_root: &Path,
        sink: &S,
    ) -> anyhow::Result<i32> {
        let report = match assemble(env, app_root) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("❌ Configuration is invalid");
                eprintln!("   Error: {e}");
                return Ok(FailureReporter::new(sink).report_error(&e).exit_code());
            }
        };
        sink.emit_all(&report.diagnostics);

        print!("{}", self.render(&report.summary())?);
        Ok(EXIT_OK)
    }

    /// Renders the summary in the selected format
    pub fn render(&self, summary: &ConfigSummary) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Text => render_text(summary),
            OutputFormat::Json => serde_json::to_string_pretty(summary)
                .map(|mut json| {
                    json.push('\n');
                    json
                })
                .context("Failed to render summary as JSON"),
            OutputFormat::Toml => {
                toml::to_string_pretty(summary).context("Failed to render summary as TOML")
            }
        }
    }
}

fn render_text(summary: &ConfigSummary) -> anyhow::Result<String> {
    let mut out = String::new();

    writeln!(out, "📋 Startup configuration")?;
    writeln!(
        out,
        "  Mode: {} (secret policy: {})",
        summary.mode, summary.secret_policy
    )?;
    writeln!(
        out,
        "  Server: {}:{}",
        summary.server.host, summary.server.port
    )?;
    writeln!(
        out,
        "  App keys: {} ({})",
        summary.server.app_keys,
        app_key_source_label(summary.server.app_keys_source)
    )?;

    let db = &summary.database;
    writeln!(out, "  Database: {} {}", db.client, db.connection)?;
    if let Some(schema) = &db.schema {
        writeln!(out, "  Schema: {schema}")?;
    }
    if let Some(pool) = &db.pool {
        writeln!(
            out,
            "  Pool: {}..{} connections, acquire timeout {} ms",
            pool.min, pool.max, pool.acquire_timeout_ms
        )?;
    }
    writeln!(
        out,
        "  TLS: {}",
        if db.ssl { "enabled" } else { "disabled" }
    )?;

    writeln!(
        out,
        "  REST: default limit {}, max limit {}, with count {}",
        summary.rest.limits.default_limit, summary.rest.limits.max_limit, summary.rest.with_count
    )?;
    match &summary.graphql {
        Some(limits) => writeln!(
            out,
            "  GraphQL: default limit {}, max limit {}",
            limits.default_limit, limits.max_limit
        )?,
        None => writeln!(out, "  GraphQL: disabled")?,
    }
    writeln!(
        out,
        "  Admin flags: nps={} promote_ee={}",
        summary.admin_flags.nps, summary.admin_flags.promote_ee
    )?;

    writeln!(out, "  Secrets:")?;
    for secret in &summary.secrets {
        let status = match secret.status {
            SecretStatus::Environment => "environment",
            SecretStatus::Generated => "generated",
            SecretStatus::Missing => "missing",
        };
        match &secret.fingerprint {
            Some(fingerprint) => {
                writeln!(out, "    {:<20} {:<12} {fingerprint}", secret.var, status)?
            }
            None => writeln!(out, "    {:<20} {status}", secret.var)?,
        }
    }

    Ok(out)
}

fn app_key_source_label(source: AppKeySource) -> &'static str {
    match source {
        AppKeySource::Environment => "environment",
        AppKeySource::Placeholder => "development placeholders",
        AppKeySource::Generated => "generated",
        AppKeySource::Missing => "missing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::sink::RecordingSink;

    fn summary(pairs: &[(&str, &str)]) -> ConfigSummary {
        let env = EnvSnapshot::from_pairs(pairs.iter().copied());
        assemble(&env, Path::new("/srv/app")).unwrap().summary()
    }

    #[test]
    fn test_text_output() {
        let summary = summary(&[("DATABASE_URL", "postgres://cms:hunter2@db/cms")]);
        let text = ShowArgs {
            format: OutputFormat::Text,
        }
        .render(&summary)
        .unwrap();

        assert!(text.contains("Mode: development"));
        assert!(text.contains("postgres://cms:****@db/cms?sslmode=require"));
        assert!(text.contains("GraphQL: disabled"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_json_output() {
        let summary = summary(&[("GRAPHQL_ENABLED", "true")]);
        let json = ShowArgs {
            format: OutputFormat::Json,
        }
        .render(&summary)
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "development");
        assert_eq!(value["database"]["client"], "sqlite");
        assert_eq!(value["graphql"]["max_limit"], 20);
        assert_eq!(value["rest"]["default_limit"], 25);
    }

    #[test]
    fn test_toml_output() {
        let summary = summary(&[]);
        let rendered = ShowArgs {
            format: OutputFormat::Toml,
        }
        .render(&summary)
        .unwrap();

        let value: toml::Value = toml::from_str(&rendered).unwrap();
        assert_eq!(value["server"]["port"].as_integer(), Some(1337));
    }

    #[test]
    fn test_invalid_configuration_exits_with_config_code() {
        let env = EnvSnapshot::from_pairs([("DATABASE_CLIENT", "oracle")]);
        let sink = RecordingSink::default();
        let code = ShowArgs {
            format: OutputFormat::Text,
        }
        .execute(&env, Path::new("."), &sink)
        .unwrap();
        assert_eq!(code, 2);
        assert_eq!(sink.records().len(), 1);
    }
}
