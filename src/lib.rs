// anon-csv - Deterministic netid pseudonymization for CSV files
// Copyright (c) 2025 anon-csv Contributors
// Licensed under the MIT License

//! # anon-csv - netid to auid pseudonymization
//!
//! anon-csv replaces student netids in CSV exports with anonymous user ids
//! (auids). The same netid under the same project secret always yields the
//! same auid, so anonymized files from one course can still be joined, while
//! the netid cannot be recovered without the secret.
//!
//! ## Overview
//!
//! An auid is derived in three steps:
//!
//! 1. **Salt**: `hex(SHA-256(hex(SHA-256(netid)) || secret))`
//! 2. **Key**: PBKDF2-HMAC-SHA256 over the netid with that salt,
//!    100000 iterations, 32 bytes
//! 3. **Token**: the Base32 text of the key, sliced into `XX-xxxxx-xxxxxx`
//!
//! ## Architecture
//!
//! - [`anonymization`] - Derivation, secrets and column planning
//! - [`core`] - CSV tables, the anonymization pipeline and run summaries
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface and argument parsing
//!
//! ## Quick Start
//!
//! ```rust
//! use anon_csv::anonymization::{Anonymizer, ProjectSecret};
//! use anon_csv::config::secret_string;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = ProjectSecret::new(secret_string("topsecret".to_string()))?;
//! let anonymizer = Anonymizer::new(secret);
//!
//! let auid = anonymizer.anonymize("alice")?;
//! assert_eq!(auid.as_str(), "JZ-gfzhz-4ui5ey");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::AnonCsvError`]. Derivation failures carry an
//! [`domain::InputError`].
//!
//! ## Logging
//!
//! anon-csv uses structured logging with the `tracing` crate. Secrets and
//! netids never appear in log output.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
