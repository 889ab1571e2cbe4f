//! Anonymize command implementation
//!
//! This module implements the `anonymize` command, which replaces the netid
//! column of a CSV file with auids and drops the other identifying columns.

use super::exit_code;
use crate::anonymization::{resolve_secret, Anonymizer, SecretOrigin};
use crate::config::{secret_string, AnonCsvConfig, InvalidRowPolicy, SecretString};
use crate::core::pipeline::{default_output_path, AnonymizationPipeline, PreparedTable};
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// CSV file to anonymize
    pub input: PathBuf,

    /// Project secret
    #[arg(
        short,
        long,
        env = "ANON_CSV_SECRET",
        hide_env_values = true,
        value_parser = parse_secret
    )]
    pub secret: Option<SecretString>,

    /// File holding the project secret
    #[arg(long, value_name = "FILE")]
    pub secret_file: Option<PathBuf>,

    /// Output file (defaults to `<input stem>-anonymized.csv` next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of concurrent derivations (0 = available parallelism)
    #[arg(long)]
    pub parallelism: Option<usize>,

    /// Drop rows with an empty or undecodable netid instead of aborting
    #[arg(long)]
    pub skip_invalid_rows: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub summary_json: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, mut config: AnonCsvConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting anonymize command");

        // Apply CLI overrides
        if let Some(parallelism) = self.parallelism {
            tracing::info!(parallelism, "Overriding parallelism from CLI");
            config.processing.parallelism = parallelism;
        }
        if self.skip_invalid_rows {
            tracing::info!("Skipping invalid rows from CLI");
            config.processing.on_invalid_row = InvalidRowPolicy::Skip;
        }

        // Input, columns and rows are checked before a secret can be generated
        let prepared = match PreparedTable::load(
            &self.input,
            &config.columns,
            config.processing.on_invalid_row,
        ) {
            Ok(prepared) => prepared,
            Err(e) => {
                log_error_with_context!(&e, "Failed to prepare input");
                eprintln!("Anonymization failed: {e}");
                return Ok(exit_code(&e));
            }
        };

        // Each kind of source falls back to the configuration; a literal and
        // a file from any mix of sources conflict
        let literal = self.secret.clone().or_else(|| config.secret.value.take());
        let file = self
            .secret_file
            .clone()
            .or_else(|| config.secret.file.clone());

        let resolved = match resolve_secret(literal, file.as_deref(), &config.secret.generated_dir)
        {
            Ok(resolved) => resolved,
            Err(e) => {
                log_error_with_context!(&e, "Failed to resolve project secret");
                eprintln!("{e}");
                return Ok(exit_code(&e));
            }
        };

        if let SecretOrigin::Generated(path) = &resolved.origin {
            tracing::warn!(path = %path.display(), "No secret provided, generated a new one");
            eprintln!("Warning: no secret was provided.");
            eprintln!("A new secret was generated and saved to `{}`.", path.display());
            eprintln!("Keep this file: the same secret is needed to produce the same auids again.");
        }

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input));

        let pipeline = AnonymizationPipeline::new(
            Anonymizer::new(resolved.secret),
            config.columns,
            config.processing,
        );

        let summary = match pipeline.run_prepared(prepared, &output).await {
            Ok(summary) => summary.with_secret_origin(resolved.origin),
            Err(e) => {
                log_error_with_context!(&e, "Anonymization failed");
                eprintln!("Anonymization failed: {e}");
                return Ok(exit_code(&e));
            }
        };

        if self.summary_json {
            println!("{}", summary.to_json()?);
        } else {
            for line in summary.to_lines() {
                println!("{line}");
            }
        }

        Ok(0)
    }
}

fn parse_secret(value: &str) -> Result<SecretString, std::convert::Infallible> {
    Ok(secret_string(value.to_string()))
}
