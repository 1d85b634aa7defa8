//! Check command implementation
//!
//! This module implements the `check` command: assemble the startup
//! configuration, emit every diagnostic, run the production checks and
//! refuse when a secret was withheld.

use crate::config::EnvSnapshot;
use crate::core::bootstrap;
use crate::core::reporting::{FailureReporter, EXIT_CONFIG, EXIT_OK};
use crate::core::startup::assemble;
use crate::domain::diagnostics::Severity;
use crate::log_secret_fallback;
use crate::logging::sink::DiagnosticSink;
use clap::Args;
use std::path::Path;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Also fail when a production check reports an error
    #[arg(long)]
    pub strict: bool,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute<S: DiagnosticSink>(
        &self,
        env: &EnvSnapshot,
        app_root: &Path,
        sink: &S,
    ) -> anyhow::Result<i32> {
        tracing::info!(app_root = %app_root.display(), "Checking startup configuration");

        println!("🔍 Checking startup configuration");
        println!();

        let reporter = FailureReporter::new(sink);

        let report = match assemble(env, app_root) {
            Ok(report) => report,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(reporter.report_error(&e).exit_code());
            }
        };

        sink.emit_all(&report.diagnostics);
        for (var, secret) in report.secrets() {
            if let Some(secret) = secret {
                log_secret_fallback!(var, secret);
            }
        }

        let validation = bootstrap::validate(env, report.context.mode);
        sink.emit_all(&validation);

        if let Err(e) = report.ensure_ready() {
            println!("❌ Startup refused: required secrets are missing");
            for var in report.missing_secrets() {
                println!("   - {var}");
            }
            println!();
            println!("   Run `cms-bootstrap generate-secrets` to create them,");
            println!("   or set SECRET_POLICY=generate to allow ephemeral values.");
            return Ok(reporter.report_error(&e).exit_code());
        }

        let warnings =
            report.diagnostics.count(Severity::Warning) + validation.count(Severity::Warning);
        let errors = validation.count(Severity::Error);

        if self.strict && errors > 0 {
            println!("❌ Production checks failed ({errors} error(s))");
            return Ok(EXIT_CONFIG);
        }

        println!("✅ Configuration is ready ({})", report.context.mode);
        println!(
            "   Server: {}:{}",
            report.server.host, report.server.port
        );
        println!("   Database: {}", report.database.client());
        if warnings > 0 || errors > 0 {
            println!("   ⚠️  {warnings} warning(s), {errors} error(s); see log output");
        }
        println!();
        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::sink::RecordingSink;

    fn run(args: CheckArgs, pairs: &[(&str, &str)]) -> (i32, RecordingSink) {
        let env = EnvSnapshot::from_pairs(pairs.iter().copied());
        let sink = RecordingSink::default();
        let code = args.execute(&env, Path::new("/srv/app"), &sink).unwrap();
        (code, sink)
    }

    #[test]
    fn test_development_is_ready() {
        let (code, sink) = run(CheckArgs { strict: false }, &[]);
        assert_eq!(code, EXIT_OK);
        assert!(sink.records().iter().all(|d| d.severity != Severity::Error));
    }

    #[test]
    fn test_refused_secrets_exit_with_config_code() {
        let (code, sink) = run(CheckArgs { strict: false }, &[("NODE_ENV", "production")]);
        assert_eq!(code, EXIT_CONFIG);
        assert!(sink
            .records()
            .iter()
            .any(|d| d.message.contains("Missing required secrets")));
    }

    #[test]
    fn test_malformed_value_exit_with_config_code() {
        let (code, _) = run(CheckArgs { strict: false }, &[("PORT", "0")]);
        assert_eq!(code, EXIT_CONFIG);
    }

    #[test]
    fn test_validator_errors_only_fail_in_strict_mode() {
        let env = [
            ("NODE_ENV", "production"),
            ("SECRET_POLICY", "generate"),
            ("APP_KEYS", "a,b,c,d"),
        ];
        let (lenient, sink) = run(CheckArgs { strict: false }, &env);
        assert_eq!(lenient, EXIT_OK);
        assert!(sink
            .records()
            .iter()
            .any(|d| d.severity == Severity::Error && d.component == "bootstrap"));

        let (strict, _) = run(CheckArgs { strict: true }, &env);
        assert_eq!(strict, EXIT_CONFIG);
    }
}
