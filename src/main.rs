// anon-csv - Deterministic netid pseudonymization for CSV files
// Copyright (c) 2025 anon-csv Contributors
// Licensed under the MIT License

use anon_csv::cli::{Cli, Commands};
use anon_csv::config::{load_config_or_default, AnonCsvConfig};
use anon_csv::domain::Result;
use anon_csv::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let loaded = load_config_or_default(cli.config.as_deref());

    // Logging comes from the configuration when it loaded, defaults otherwise
    let (log_level, logging_config) = match &loaded {
        Ok(config) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            Default::default(),
        ),
    };

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "anon-csv starting");

    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, loaded: Result<AnonCsvConfig>) -> anyhow::Result<i32> {
    if let Commands::ValidateConfig(args) = &cli.command {
        return args.execute(cli.config.as_deref(), &loaded).await;
    }

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("{e}");
            return Ok(2); // Configuration error exit code
        }
    };

    match &cli.command {
        Commands::Anonymize(args) => args.execute(config).await,
        Commands::GenerateSecret(args) => args.execute(&config).await,
        Commands::ValidateConfig(_) => Ok(0),
    }
}
