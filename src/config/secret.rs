//! Secure secret handling using the secrecy crate
//!
//! The project secret is the whole security boundary of the anonymization:
//! anyone holding it can recompute every auid from a list of candidate
//! netids. It therefore lives in a `Secret<SecretValue>` which zeroes its
//! memory on drop and redacts itself from `Debug` output.
//!
//! # Example
//!
//! ```rust
//! use anon_csv::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let secret = secret_string("project-secret".to_string());
//! assert_eq!(secret.expose_secret().as_bytes(), b"project-secret");
//!
//! // Debug output is redacted
//! assert!(!format!("{secret:?}").contains("project-secret"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

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

    /// UTF-8 bytes of the secret, as fed to the derivation
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
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
