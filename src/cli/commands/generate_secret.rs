//! Generate secret command implementation
//!
//! Writes a fresh project secret to a new file. The secret itself is never
//! printed; only the path of the file is.

use super::exit_code;
use crate::anonymization::secret::persist_generated_secret;
use crate::config::AnonCsvConfig;
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-secret command
#[derive(Args, Debug)]
pub struct GenerateSecretArgs {
    /// Directory for the secret file (defaults to `secret.generated_dir`)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

impl GenerateSecretArgs {
    /// Execute the generate-secret command
    pub async fn execute(&self, config: &AnonCsvConfig) -> anyhow::Result<i32> {
        let dir = self
            .dir
            .clone()
            .unwrap_or_else(|| config.secret.generated_dir.clone());

        match persist_generated_secret(&dir) {
            Ok((_, path)) => {
                tracing::info!(path = %path.display(), "Generated project secret");
                println!("Secret saved to `{}`", path.display());
                println!("Pass it to future runs with --secret-file to reproduce the same auids.");
                Ok(0)
            }
            Err(e) => {
                log_error_with_context!(&e, "Failed to generate project secret");
                eprintln!("{e}");
                Ok(exit_code(&e))
            }
        }
    }
}
