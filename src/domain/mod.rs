//! Domain types shared by every layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error types** ([`BootstrapError`], [`EnvError`])
//! - **Result type alias** ([`Result`])
//! - **Diagnostics** ([`Diagnostic`], [`Diagnostics`], [`Built`]) that builders
//!   return instead of logging
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BootstrapError>`]:
//!
//! ```rust
//! use cms_bootstrap::config::EnvSnapshot;
//! use cms_bootstrap::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let env = EnvSnapshot::from_pairs([("PORT", "8080")]);
//!     let port: u16 = env.int("PORT", 1337)?;
//!     assert_eq!(port, 8080);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod diagnostics;
pub mod errors;
pub mod result;

pub use diagnostics::{Built, Diagnostic, Diagnostics, Severity};
pub use errors::{BootstrapError, EnvError};
pub use result::Result;
