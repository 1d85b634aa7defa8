// CMS Bootstrap - Startup configuration resolver
// Copyright (c) 2025 CMS Bootstrap Contributors
// Licensed under the MIT License

//! # CMS Bootstrap - Startup configuration resolver
//!
//! CMS Bootstrap turns the environment of a cloud-deployed content-management
//! server into a validated, typed startup configuration.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** secrets with an explicit production policy (fail-fast or
//!   generate-with-warning)
//! - **Selecting** the database driver and building its connection descriptor
//! - **Normalizing** PostgreSQL URLs so they always require TLS
//! - **Masking** credentials before anything is printed
//! - **Validating** a production deployment once configuration is assembled
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Builders, startup assembly, validation, failure reporting
//! - [`domain`] - Errors and diagnostics
//! - [`config`] - Environment snapshot, runtime mode, secrets and schema types
//! - [`logging`] - Structured logging and the diagnostic sink
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cms_bootstrap::config::load_environment;
//! use cms_bootstrap::core::startup::assemble;
//! use cms_bootstrap::logging::{DiagnosticSink, TracingSink};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let env = load_environment(None)?;
//!     let report = assemble(&env, Path::new("."))?;
//!
//!     TracingSink.emit_all(&report.diagnostics);
//!     report.ensure_ready()?;
//!
//!     println!("{}", serde_json::to_string_pretty(&report.summary())?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Malformed values are [`domain::EnvError`]s naming the variable, wrapped in
//! [`domain::BootstrapError`]. Secrets refused under the fail-fast policy are
//! not errors during assembly; they surface from
//! [`core::startup::StartupReport::ensure_ready`].
//!
//! ## Logging
//!
//! Builders never log. They return diagnostics, and the binary sends them
//! through a single [`logging::TracingSink`]. Secret values never appear in
//! diagnostics; use [`config::fingerprint`] to identify a secret in output.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
