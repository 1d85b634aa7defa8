//! Integration tests for production checks and failure reporting

use cms_bootstrap::config::{DatabaseClient, EnvSnapshot, RuntimeMode};
use cms_bootstrap::core::bootstrap::validate;
use cms_bootstrap::core::startup::assemble;
use cms_bootstrap::core::reporting::{
    Disposition, FailureReporter, FailureSeverity, EXIT_CONFIG, EXIT_FATAL,
};
use cms_bootstrap::domain::{BootstrapError, Severity};
use cms_bootstrap::logging::{DiagnosticSink, RecordingSink};
use std::path::Path;

#[test]
fn test_production_without_database_source_emits_one_error() {
    let env = EnvSnapshot::from_pairs([("NODE_ENV", "production"), ("APP_KEYS", "a,b,c,d")]);
    let diagnostics = validate(&env, RuntimeMode::Production);

    assert_eq!(diagnostics.count(Severity::Error), 1);
    let error = diagnostics
        .iter()
        .find(|d| d.severity == Severity::Error)
        .unwrap();
    assert!(error.message.contains("DATABASE_URL"));
}

#[test]
fn test_database_host_alone_does_not_satisfy_production() {
    let env = EnvSnapshot::from_pairs([
        ("NODE_ENV", "production"),
        ("SECRET_POLICY", "generate"),
        ("DATABASE_HOST", "db.internal"),
        ("APP_KEYS", "a,b,c,d"),
    ]);
    let report = assemble(&env, Path::new("/srv/cms")).unwrap();
    assert_eq!(report.database.client(), DatabaseClient::Sqlite);

    let diagnostics = validate(&env, report.context.mode);
    assert_eq!(diagnostics.count(Severity::Error), 1);
    assert!(!diagnostics
        .iter()
        .any(|d| d.severity == Severity::Info && d.var.as_deref() == Some("DATABASE_HOST")));
}

#[test]
fn test_database_host_counts_once_a_network_driver_is_selected() {
    let env = EnvSnapshot::from_pairs([
        ("NODE_ENV", "production"),
        ("SECRET_POLICY", "generate"),
        ("DATABASE_CLIENT", "postgres"),
        ("DATABASE_HOST", "db.internal"),
        ("APP_KEYS", "a,b,c,d"),
    ]);
    let report = assemble(&env, Path::new("/srv/cms")).unwrap();
    assert_eq!(report.database.client(), DatabaseClient::Postgres);
    assert!(!validate(&env, report.context.mode).has_errors());
}

#[test]
fn test_one_line_per_check() {
    let env = EnvSnapshot::from_pairs([("DATABASE_URL", "postgres://u:p@h/db")]);
    let diagnostics = validate(&env, RuntimeMode::Production);

    // mode, database source, application keys
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics.count(Severity::Warning), 1);
}

#[test]
fn test_development_skips_production_checks() {
    let diagnostics = validate(&EnvSnapshot::default(), RuntimeMode::Development);
    assert_eq!(diagnostics.len(), 1);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_validator_errors_flow_through_sink() {
    let sink = RecordingSink::default();
    sink.emit_all(&validate(&EnvSnapshot::default(), RuntimeMode::Production));

    let records = sink.records();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().filter(|d| d.severity == Severity::Error).count(),
        1
    );
}

#[test]
fn test_reporter_policy_per_severity() {
    let reporter = FailureReporter::new(RecordingSink::default());

    assert_eq!(
        reporter.report(FailureSeverity::Recoverable, "metrics flush failed"),
        Disposition::Continue
    );
    assert_eq!(
        reporter.report(FailureSeverity::Fatal, "listener closed"),
        Disposition::Terminate {
            exit_code: EXIT_FATAL
        }
    );

    let refused = BootstrapError::MissingSecrets {
        vars: vec!["APP_KEYS".to_string()],
    };
    assert_eq!(reporter.report_error(&refused).exit_code(), EXIT_CONFIG);

    let records = reporter.sink().records();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|d| d.severity == Severity::Error));
}
