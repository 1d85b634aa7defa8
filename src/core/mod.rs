//! Configuration assembly for CMS Bootstrap.
//!
//! This module turns an [`EnvSnapshot`](crate::config::EnvSnapshot) into
//! the configuration sections the host framework consumes.
//!
//! # Modules
//!
//! - [`secrets`] - Secret resolution with the production policy
//! - [`connection`] - Connection string normalization and password masking
//! - [`server`] - Host, port and application keys
//! - [`database`] - Driver selection and connection descriptors
//! - [`admin`] - Admin secrets and feature flags
//! - [`plugins`] - Pagination limits and the users & permissions secret
//! - [`startup`] - Assembles every section into a [`StartupReport`](startup::StartupReport)
//! - [`bootstrap`] - Post-assembly production checks
//! - [`reporting`] - Unexpected failure reporting and exit codes
//!
//! # Startup Workflow
//!
//! 1. **Load**: read `.env` (never overriding) and snapshot the environment
//! 2. **Assemble**: run every builder against the snapshot
//! 3. **Emit**: send the collected diagnostics through one sink
//! 4. **Validate**: run the production checks
//! 5. **Gate**: refuse to start when a secret was refused
//!
//! # Example
//!
//! ```rust
//! use cms_bootstrap::config::EnvSnapshot;
//! use cms_bootstrap::core::{bootstrap, startup};
//! use cms_bootstrap::logging::{DiagnosticSink, TracingSink};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = EnvSnapshot::from_pairs([("NODE_ENV", "development")]);
//!
//! let report = startup::assemble(&env, Path::new("."))?;
//! TracingSink.emit_all(&report.diagnostics);
//! TracingSink.emit_all(&bootstrap::validate(&env, report.context.mode));
//! report.ensure_ready()?;
//!
//! println!("Listening on {}:{}", report.server.host, report.server.port);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod admin;
pub mod bootstrap;
pub mod connection;
pub mod database;
pub mod plugins;
pub mod reporting;
pub mod secrets;
pub mod server;
pub mod startup;
