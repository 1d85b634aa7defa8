//! Secure credential handling using the secrecy crate
//!
//! Resolved secrets, generated fallbacks and database passwords are all held
//! as [`SecretString`]. The wrapper zeroes memory on drop, redacts `Debug`
//! output and forces callers through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use cms_bootstrap::config::{generate_secret, fingerprint};
//! use secrecy::ExposeSecret;
//!
//! let secret = generate_secret();
//! assert!(!secret.expose_secret().is_empty());
//!
//! // Safe to log: a short digest prefix, never the value
//! let print = fingerprint(&secret);
//! assert_eq!(print.len(), 12);
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret};
use serde::Serialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Bytes of entropy in a generated secret
pub const SECRET_BYTES: usize = 32;

/// Smallest entropy accepted by [`generate_secret_with_len`]
pub const MIN_SECRET_BYTES: usize = 16;

/// Hex characters kept from the SHA-256 digest in a fingerprint
const FINGERPRINT_LEN: usize = 12;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Type alias for a secret string
///
/// This wraps a `SecretValue` in a `Secret` container that:
/// - Zeros the memory when dropped
/// - Prevents accidental logging via Debug
/// - Requires explicit `expose_secret()` to access
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Helper function to create an optional SecretString from an optional String
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}

/// Where a resolved secret came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretSource {
    /// Read verbatim from the environment; stable across restarts
    Environment,
    /// Freshly generated for this process only
    Generated,
}

/// A secret value plus its provenance
#[derive(Debug, Clone)]
pub struct ResolvedSecret {
    /// The secret itself
    pub value: SecretString,

    /// Where it came from
    pub source: SecretSource,
}

impl ResolvedSecret {
    /// Wraps a value read from the environment
    pub fn from_env(value: String) -> Self {
        Self {
            value: secret_string(value),
            source: SecretSource::Environment,
        }
    }

    /// Generates a fresh secret
    pub fn generated() -> Self {
        Self {
            value: generate_secret(),
            source: SecretSource::Generated,
        }
    }

    /// Whether the value will change on the next restart
    pub fn is_ephemeral(&self) -> bool {
        self.source == SecretSource::Generated
    }

    /// Fingerprint of the value, safe to print
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.value)
    }
}

/// Generates a fresh 256-bit secret, base64 encoded
///
/// Randomness comes from the operating system CSPRNG.
pub fn generate_secret() -> SecretString {
    encode_random(SECRET_BYTES)
}

/// Generates a secret with `len` bytes of entropy
///
/// Returns `None` when `len` is below [`MIN_SECRET_BYTES`].
pub fn generate_secret_with_len(len: usize) -> Option<SecretString> {
    (len >= MIN_SECRET_BYTES).then(|| encode_random(len))
}

fn encode_random(len: usize) -> SecretString {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    let encoded = STANDARD.encode(&bytes);
    bytes.zeroize();
    secret_string(encoded)
}

/// Short SHA-256 fingerprint of a secret, safe to print
pub fn fingerprint(secret: &SecretString) -> String {
    let digest = Sha256::digest(secret.expose_secret().as_str().as_bytes());
    let mut hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex.truncate(FINGERPRINT_LEN);
    hex
}
