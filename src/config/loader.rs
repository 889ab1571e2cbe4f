//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AnonCsvConfig;
use crate::domain::errors::AnonCsvError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AnonCsvConfig
/// 4. Applies environment variable overrides (ANON_CSV_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use anon_csv::config::loader::load_config;
///
/// let config = load_config("anon-csv.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnonCsvConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AnonCsvError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AnonCsvError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: AnonCsvConfig = toml::from_str(&contents)
        .map_err(|e| AnonCsvError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finalize(config)
}

/// Loads the configuration file if one is given, defaults otherwise
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&str>) -> Result<AnonCsvConfig> {
    match path {
        Some(path) => load_config(path),
        None => finalize(AnonCsvConfig::default()),
    }
}

fn finalize(mut config: AnonCsvConfig) -> Result<AnonCsvConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AnonCsvError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AnonCsvError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AnonCsvError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ANON_CSV_* prefix
///
/// Environment variables follow the pattern: ANON_CSV_<SECTION>_<KEY>.
/// The literal secret itself is read from `ANON_CSV_SECRET` by the CLI.
fn apply_env_overrides(config: &mut AnonCsvConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("ANON_CSV_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Secret overrides
    if let Ok(val) = std::env::var("ANON_CSV_SECRET_FILE") {
        config.secret.file = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("ANON_CSV_SECRET_GENERATED_DIR") {
        config.secret.generated_dir = PathBuf::from(val);
    }

    // Column overrides
    if let Ok(val) = std::env::var("ANON_CSV_COLUMNS_IDENTIFIER") {
        config.columns.identifier = val;
    }
    if let Ok(val) = std::env::var("ANON_CSV_COLUMNS_AUID_COLUMN") {
        config.columns.auid_column = val;
    }

    // Processing overrides
    if let Ok(val) = std::env::var("ANON_CSV_PROCESSING_PARALLELISM") {
        config.processing.parallelism = val.parse().map_err(|_| {
            AnonCsvError::Configuration(format!(
                "Invalid ANON_CSV_PROCESSING_PARALLELISM value: {val}"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("ANON_CSV_PROCESSING_ON_INVALID_ROW") {
        config.processing.on_invalid_row = val.parse().map_err(AnonCsvError::Configuration)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ANON_CSV_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ANON_CSV_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
