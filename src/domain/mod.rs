//! Domain types for anon-csv.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Anonymous identifier** ([`Auid`]), a validated token newtype
//! - **Error types** ([`AnonCsvError`], [`InputError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, AnonCsvError>`]:
//!
//! ```rust
//! use anon_csv::domain::{AnonCsvError, InputError, Result};
//!
//! fn check(netid: &str) -> Result<()> {
//!     if netid.is_empty() {
//!         return Err(InputError::EmptyIdentifier.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(check(""), Err(AnonCsvError::Input(_))));
//! ```

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{AnonCsvError, InputError};
pub use ids::Auid;
pub use result::Result;
