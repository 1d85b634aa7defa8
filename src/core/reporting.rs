//! Unexpected failure reporting
//!
//! Every failure that escapes normal control flow goes through one
//! [`FailureReporter`]. The reporter logs the failure as an error-class
//! diagnostic and tells the caller whether to keep running or to exit, and
//! with which code. Nothing is swallowed silently.

use crate::domain::diagnostics::{Diagnostic, Severity};
use crate::domain::errors::BootstrapError;
use crate::logging::sink::DiagnosticSink;
use std::fmt;

/// Exit code for a clean run
pub const EXIT_OK: i32 = 0;
/// Exit code for configuration errors and refused secrets
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for unexpected fatal failures
pub const EXIT_FATAL: i32 = 5;

const COMPONENT: &str = "failure";

/// How serious an unexpected failure is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSeverity {
    /// Log and keep running
    Recoverable,
    /// Log and terminate
    Fatal,
}

/// What the caller should do after a failure was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep running
    Continue,
    /// Exit the process with the given code
    Terminate { exit_code: i32 },
}

impl Disposition {
    /// Exit code to use; [`EXIT_OK`] when the caller may continue
    pub fn exit_code(self) -> i32 {
        match self {
            Disposition::Continue => EXIT_OK,
            Disposition::Terminate { exit_code } => exit_code,
        }
    }
}

/// Routes unexpected failures through a diagnostic sink
#[derive(Debug)]
pub struct FailureReporter<S: DiagnosticSink> {
    sink: S,
}

impl<S: DiagnosticSink> FailureReporter<S> {
    /// Creates a reporter writing to `sink`
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Reports a failure with an explicit severity
    pub fn report(&self, severity: FailureSeverity, failure: impl fmt::Display) -> Disposition {
        let (label, disposition) = match severity {
            FailureSeverity::Recoverable => ("Recoverable failure", Disposition::Continue),
            FailureSeverity::Fatal => (
                "Fatal failure",
                Disposition::Terminate {
                    exit_code: EXIT_FATAL,
                },
            ),
        };
        self.sink.emit(&Diagnostic::new(
            Severity::Error,
            COMPONENT,
            format!("{label}: {failure}"),
        ));
        disposition
    }

    /// Reports a bootstrap error; configuration problems exit with
    /// [`EXIT_CONFIG`], everything else is fatal
    pub fn report_error(&self, error: &BootstrapError) -> Disposition {
        match error {
            BootstrapError::Configuration(_)
            | BootstrapError::Env(_)
            | BootstrapError::MissingSecrets { .. } => {
                self.sink
                    .emit(&Diagnostic::new(Severity::Error, COMPONENT, error.to_string()));
                Disposition::Terminate {
                    exit_code: EXIT_CONFIG,
                }
            }
            BootstrapError::Io(_) => self.report(FailureSeverity::Fatal, error),
        }
    }

    /// The underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Logs panics through `tracing` before handing them to the previous hook
///
/// The previous hook still runs, so the default panic message and
/// backtrace are printed as before.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!(location = %location, "Unexpected panic: {info}");
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::EnvError;
    use crate::logging::sink::RecordingSink;

    #[test]
    fn test_recoverable_continues_and_logs() {
        let reporter = FailureReporter::new(RecordingSink::default());
        let disposition = reporter.report(FailureSeverity::Recoverable, "cache warmup failed");

        assert_eq!(disposition, Disposition::Continue);
        assert_eq!(disposition.exit_code(), EXIT_OK);
        let records = reporter.sink().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Error);
        assert!(records[0].message.contains("cache warmup failed"));
    }

    #[test]
    fn test_fatal_terminates() {
        let reporter = FailureReporter::new(RecordingSink::default());
        let disposition = reporter.report(FailureSeverity::Fatal, "listener crashed");
        assert_eq!(
            disposition,
            Disposition::Terminate {
                exit_code: EXIT_FATAL
            }
        );
    }

    #[test]
    fn test_configuration_errors_exit_with_config_code() {
        let reporter = FailureReporter::new(RecordingSink::default());
        let err = BootstrapError::Env(EnvError::InvalidInteger {
            var: "PORT".to_string(),
            value: "x".to_string(),
        });
        assert_eq!(reporter.report_error(&err).exit_code(), EXIT_CONFIG);

        let missing = BootstrapError::MissingSecrets {
            vars: vec!["JWT_SECRET".to_string()],
        };
        assert_eq!(reporter.report_error(&missing).exit_code(), EXIT_CONFIG);
        assert_eq!(reporter.sink().records().len(), 2);
    }

    #[test]
    fn test_io_errors_are_fatal() {
        let reporter = FailureReporter::new(RecordingSink::default());
        let err = BootstrapError::Io("disk full".to_string());
        assert_eq!(reporter.report_error(&err).exit_code(), EXIT_FATAL);
    }
}
