//! Configuration management for anon-csv.
//!
//! # Overview
//!
//! anon-csv runs fine without a configuration file. A TOML file can adjust
//! column names, the secret source, concurrency and logging, with support
//! for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ANON_CSV_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [secret]
//! file = "projects/cs101.secret"
//!
//! [columns]
//! identifier = "netid"
//! identifier_aliases = ["Username"]
//! auid_column = "auid"
//! remove = ["netid", "Last Name", "First Name", "Username", "Student ID", "UIN"]
//!
//! [processing]
//! parallelism = 0
//! on_invalid_row = "abort"
//!
//! [logging]
//! local_enabled = false
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use anon_csv::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("anon-csv.toml")?;
//! println!("Identifier column: {}", config.columns.identifier);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    AnonCsvConfig, ApplicationConfig, ColumnsConfig, InvalidRowPolicy, LoggingConfig,
    ProcessingConfig, SecretConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
