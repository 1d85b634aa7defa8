//! Diagnostic sinks
//!
//! Builders return diagnostics as data; a sink is the one place they turn
//! into output.

use crate::domain::diagnostics::{Diagnostic, Diagnostics, Severity};
use std::sync::Mutex;

/// Consumer of startup diagnostics
pub trait DiagnosticSink {
    /// Emits a single diagnostic
    fn emit(&self, diagnostic: &Diagnostic);

    /// Emits every diagnostic in order
    fn emit_all(&self, diagnostics: &Diagnostics) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Sink that writes diagnostics as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, d: &Diagnostic) {
        let var = d.var.as_deref();
        match d.severity {
            Severity::Info => {
                tracing::info!(component = d.component, var, "{}", d.message)
            }
            Severity::Warning => {
                tracing::warn!(component = d.component, var, "{}", d.message)
            }
            Severity::Error => {
                tracing::error!(component = d.component, var, "{}", d.message)
            }
        }
    }
}

/// Sink that keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Copy of everything emitted so far
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic.clone());
    }
}
