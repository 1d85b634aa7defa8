//! Startup diagnostics
//!
//! Builders and the bootstrap validator never log directly. They return
//! their findings as [`Diagnostic`] values which a single sink turns into
//! log lines (see [`crate::logging::sink`]).

use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, nothing to fix
    Info,
    /// Startup proceeds but the deployment should be fixed
    Warning,
    /// Startup cannot be considered healthy
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single finding produced during startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity class
    pub severity: Severity,

    /// Component that produced the diagnostic (e.g. "database")
    pub component: &'static str,

    /// Human-readable message; never contains a secret value
    pub message: String,

    /// Environment variable the diagnostic is about, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub var: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic
    pub fn new(severity: Severity, component: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            component,
            message: message.into(),
            var: None,
        }
    }

    /// Attaches the environment variable the diagnostic refers to
    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.var = Some(var.into());
        self
    }
}

/// Ordered list of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Creates an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Appends an info diagnostic
    pub fn info(&mut self, component: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Info, component, message));
    }

    /// Appends a warning diagnostic
    pub fn warning(&mut self, component: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Warning, component, message));
    }

    /// Appends an error diagnostic
    pub fn error(&mut self, component: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::new(Severity::Error, component, message));
    }

    /// Moves all diagnostics from `other` to the end of this list
    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    /// Iterates over the diagnostics in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of diagnostics with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.0.iter().filter(|d| d.severity == severity).count()
    }

    /// Whether any error-class diagnostic is present
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builder output: the assembled value plus what was observed while building it
#[derive(Debug)]
pub struct Built<T> {
    /// The assembled configuration section
    pub value: T,

    /// Diagnostics collected while assembling it
    pub diagnostics: Diagnostics,
}

impl<T> Built<T> {
    /// Pairs a value with its diagnostics
    pub fn new(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }
}
