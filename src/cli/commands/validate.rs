//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the anon-csv configuration file.

use crate::config::{AnonCsvConfig, InvalidRowPolicy};
use crate::domain::Result;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// `loaded` is the outcome of loading `config_path` (or the defaults when
    /// no path was given); loading already validates.
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        loaded: &Result<AnonCsvConfig>,
    ) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("(built-in defaults)");
        tracing::info!(config_path = %source, "Validating configuration");

        println!("Validating configuration: {source}");
        println!();

        let config = match loaded {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Secret Source: {}", describe_secret_source(config));
        println!("  Identifier Column: {}", config.columns.identifier);
        println!(
            "  Identifier Aliases: {:?}",
            config.columns.identifier_aliases
        );
        println!("  Auid Column: {}", config.columns.auid_column);
        println!("  Removed Columns: {:?}", config.columns.remove);
        println!(
            "  Parallelism: {}",
            config.processing.effective_parallelism()
        );
        println!(
            "  Invalid Rows: {}",
            match config.processing.on_invalid_row {
                InvalidRowPolicy::Abort => "abort",
                InvalidRowPolicy::Skip => "skip",
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();

        Ok(0)
    }
}

fn describe_secret_source(config: &AnonCsvConfig) -> String {
    match (&config.secret.value, &config.secret.file) {
        (Some(_), _) => "inline value".to_string(),
        (None, Some(path)) => format!("file {}", path.display()),
        (None, None) => format!(
            "generated into {} when not given on the command line",
            config.secret.generated_dir.display()
        ),
    }
}
