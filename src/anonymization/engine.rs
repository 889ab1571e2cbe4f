//! Identifier anonymizer
//!
//! [`Anonymizer`] binds the derivation functions to one project secret. The
//! secret is passed in at construction time, so anonymizers for different
//! projects can coexist in one process.
//!
//! # Thread Safety
//!
//! The anonymizer holds no mutable state. It is cheap to clone (the secret
//! is shared behind an `Arc`) and can be moved into blocking tasks to derive
//! many auids concurrently.
//!
//! # Examples
//!
//! ```
//! use anon_csv::anonymization::{Anonymizer, ProjectSecret};
//! use anon_csv::config::secret_string;
//!
//! # fn example() -> anyhow::Result<()> {
//! let secret = ProjectSecret::new(secret_string("topsecret".to_string()))?;
//! let anonymizer = Anonymizer::new(secret);
//!
//! let auid = anonymizer.anonymize("alice")?;
//! assert_eq!(auid.as_str(), "JZ-gfzhz-4ui5ey");
//! # Ok(())
//! # }
//! ```

use crate::anonymization::derivation::derive_auid;
use crate::anonymization::secret::ProjectSecret;
use crate::domain::{Auid, InputError};
use std::sync::Arc;

/// Derives auids under a single project secret
#[derive(Debug, Clone)]
pub struct Anonymizer {
    secret: Arc<ProjectSecret>,
}

impl Anonymizer {
    /// Create an anonymizer for the given project secret
    pub fn new(secret: ProjectSecret) -> Self {
        Self {
            secret: Arc::new(secret),
        }
    }

    /// Derive the auid of a netid
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyIdentifier`] if `netid` is empty.
    pub fn anonymize(&self, netid: &str) -> Result<Auid, InputError> {
        derive_auid(netid.as_bytes(), self.secret.expose_bytes())
    }

    /// Derive the auid of a raw netid field, validating its encoding first
    pub fn anonymize_bytes(&self, netid: &[u8]) -> Result<Auid, InputError> {
        let netid = Self::validate_identifier(netid)?;
        self.anonymize(netid)
    }

    /// Check that a raw field is a usable identifier without deriving anything
    ///
    /// This is cheap and lets callers reject bad rows before scheduling the
    /// key-stretching work.
    pub fn validate_identifier(netid: &[u8]) -> Result<&str, InputError> {
        let netid =
            std::str::from_utf8(netid).map_err(|e| InputError::InvalidEncoding(e.to_string()))?;
        if netid.is_empty() {
            return Err(InputError::EmptyIdentifier);
        }
        Ok(netid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn anonymizer(secret: &str) -> Anonymizer {
        Anonymizer::new(ProjectSecret::new(secret_string(secret.to_string())).unwrap())
    }

    #[test]
    fn test_anonymize_known_value() {
        let auid = anonymizer("topsecret").anonymize("bob").unwrap();
        assert_eq!(auid.as_str(), "NT-qtitn-opinbh");
    }

    #[test]
    fn test_anonymize_bytes_matches_str() {
        let anonymizer = anonymizer("topsecret");
        assert_eq!(
            anonymizer.anonymize_bytes("jöhn".as_bytes()).unwrap(),
            anonymizer.anonymize("jöhn").unwrap()
        );
    }

    #[test]
    fn test_validate_identifier() {
        assert_eq!(Anonymizer::validate_identifier(b"alice"), Ok("alice"));
        assert_eq!(
            Anonymizer::validate_identifier(b""),
            Err(InputError::EmptyIdentifier)
        );
        assert!(matches!(
            Anonymizer::validate_identifier(&[0x66, 0xff, 0x6f]),
            Err(InputError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_anonymizers_with_different_secrets_coexist() {
        let first = anonymizer("project-a");
        let second = anonymizer("project-b");
        let clone = first.clone();

        let a = first.anonymize("alice").unwrap();
        assert_ne!(a, second.anonymize("alice").unwrap());
        assert_eq!(a, clone.anonymize("alice").unwrap());
    }

    #[test]
    fn test_anonymizer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Anonymizer>();
    }
}
