//! Configuration schema types
//!
//! This module defines the configuration structure for anon-csv. Every
//! section has defaults, so an empty file (or no file at all) is a valid
//! configuration.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main anon-csv configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonCsvConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Project secret source
    #[serde(default)]
    pub secret: SecretConfig,

    /// Identifier and removed columns
    #[serde(default)]
    pub columns: ColumnsConfig,

    /// Row processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AnonCsvConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.secret.validate()?;
        self.columns.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Project secret configuration
///
/// At most one of `value` and `file` may be set. When neither is set (and
/// none is given on the command line) a new secret is generated into
/// `generated_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretConfig {
    /// Literal project secret
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default, skip_serializing)]
    pub value: Option<SecretString>,

    /// Path to a file holding the project secret
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Directory generated secrets are written to
    #[serde(default = "default_generated_dir")]
    pub generated_dir: PathBuf,
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            value: None,
            file: None,
            generated_dir: default_generated_dir(),
        }
    }
}

impl SecretConfig {
    fn validate(&self) -> Result<(), String> {
        if self.value.is_some() && self.file.is_some() {
            return Err("secret.value and secret.file are mutually exclusive".to_string());
        }
        Ok(())
    }
}

/// Column handling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    /// Column holding the netid
    #[serde(default = "default_identifier_column")]
    pub identifier: String,

    /// Fallback identifier columns, tried in order when `identifier` is absent
    #[serde(default = "default_identifier_aliases")]
    pub identifier_aliases: Vec<String>,

    /// Name of the auid column inserted first in the output
    #[serde(default = "default_auid_column")]
    pub auid_column: String,

    /// Identifying columns dropped from the output wherever present
    #[serde(default = "default_removed_columns")]
    pub remove: Vec<String>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            identifier: default_identifier_column(),
            identifier_aliases: default_identifier_aliases(),
            auid_column: default_auid_column(),
            remove: default_removed_columns(),
        }
    }
}

impl ColumnsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.identifier.trim().is_empty() {
            return Err("columns.identifier cannot be empty".to_string());
        }
        if self.auid_column.trim().is_empty() {
            return Err("columns.auid_column cannot be empty".to_string());
        }
        if self.identifier_aliases.iter().any(|a| a.trim().is_empty()) {
            return Err("columns.identifier_aliases cannot contain empty names".to_string());
        }
        Ok(())
    }
}

/// What to do with a row whose netid cannot be anonymized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRowPolicy {
    /// Fail the whole run before any output is written
    #[default]
    Abort,
    /// Drop the row from the output and report it
    Skip,
}

impl std::str::FromStr for InvalidRowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(format!(
                "Invalid on_invalid_row '{s}'. Must be one of: abort, skip"
            )),
        }
    }
}

/// Row processing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Concurrent derivations (0 = number of CPU cores)
    #[serde(default)]
    pub parallelism: usize,

    /// Invalid row handling
    #[serde(default)]
    pub on_invalid_row: InvalidRowPolicy,
}

impl ProcessingConfig {
    /// Effective number of concurrent derivations
    pub fn effective_parallelism(&self) -> usize {
        match self.parallelism {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Write file logs as JSON lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_generated_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_identifier_column() -> String {
    "netid".to_string()
}

fn default_identifier_aliases() -> Vec<String> {
    vec!["Username".to_string()]
}

fn default_auid_column() -> String {
    "auid".to_string()
}

fn default_removed_columns() -> Vec<String> {
    ["netid", "Last Name", "First Name", "Username", "Student ID", "UIN"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
