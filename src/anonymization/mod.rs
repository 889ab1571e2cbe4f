//! Anonymization module for anon-csv
//!
//! This module turns netids into anonymous identifiers ("auids") under a
//! project-specific secret and plans which identifying columns are removed.
//!
//! # Architecture
//!
//! - **Derivation**: salted, key-stretched, one-way netid → auid transform
//! - **Engine**: [`Anonymizer`], the derivation bound to one project secret
//! - **Secret**: resolution, generation and persistence of project secrets
//! - **Schema**: [`ColumnPlan`], the output column layout of a table
//!
//! # Usage
//!
//! ```rust
//! use anon_csv::anonymization::{Anonymizer, ProjectSecret};
//! use anon_csv::config::secret_string;
//!
//! let secret = ProjectSecret::new(secret_string("topsecret".to_string())).unwrap();
//! let anonymizer = Anonymizer::new(secret);
//! assert_eq!(anonymizer.anonymize("alicia").unwrap().as_str(), "XO-hqchx-h2mnsd");
//! ```

pub mod derivation;
pub mod engine;
pub mod schema;
pub mod secret;

// Re-export main types
pub use derivation::{derive_auid, derive_salt, PBKDF2_ITERATIONS};
pub use engine::Anonymizer;
pub use schema::ColumnPlan;
pub use secret::{resolve_secret, ProjectSecret, ResolvedSecret, SecretOrigin};
