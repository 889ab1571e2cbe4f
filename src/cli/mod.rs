//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for anon-csv using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// anon-csv - replace student netids in CSV files with stable anonymous ids
#[derive(Parser, Debug)]
#[command(name = "anon-csv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, env = "ANON_CSV_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ANON_CSV_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize a CSV file
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Generate a new project secret file
    GenerateSecret(commands::generate_secret::GenerateSecretArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
