//! Run summary and reporting
//!
//! A [`RunSummary`] records what an anonymization run did. It never holds
//! the secret or any netid, so it is safe to print, log or store next to the
//! anonymized output.

use crate::anonymization::SecretOrigin;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one anonymization run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Input CSV file
    pub input_path: PathBuf,

    /// Anonymized CSV file
    pub output_path: PathBuf,

    /// Column the netids were read from
    pub identifier_column: String,

    /// Identifying columns removed from the output
    pub removed_columns: Vec<String>,

    /// Rows written to the output
    pub rows_processed: usize,

    /// Rows dropped because their netid could not be anonymized
    pub rows_skipped: usize,

    /// Where the project secret came from
    pub secret_origin: Option<SecretOrigin>,

    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

impl RunSummary {
    /// Create a summary for a run between `input_path` and `output_path`
    pub fn new(input_path: PathBuf, output_path: PathBuf, identifier_column: String) -> Self {
        Self {
            input_path,
            output_path,
            identifier_column,
            removed_columns: Vec::new(),
            rows_processed: 0,
            rows_skipped: 0,
            secret_origin: None,
            duration_ms: 0,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Record the secret origin
    pub fn with_secret_origin(mut self, origin: SecretOrigin) -> Self {
        self.secret_origin = Some(origin);
        self
    }

    /// Whether some rows were dropped
    pub fn has_skipped_rows(&self) -> bool {
        self.rows_skipped > 0
    }

    /// Render the summary as JSON
    pub fn to_json(&self) -> crate::domain::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the summary as operator-facing text lines
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Processed \"{}\"", self.input_path.display())];

        lines.push(format!(
            "- Identifier column: `{}`",
            self.identifier_column
        ));
        for column in &self.removed_columns {
            lines.push(format!(
                "- Removed column `{column}` and data from anonymized output"
            ));
        }
        lines.push(format!("- Processed {} row(s)", self.rows_processed));
        if self.has_skipped_rows() {
            lines.push(format!(
                "- Skipped {} row(s) with invalid identifiers",
                self.rows_skipped
            ));
        }
        match &self.secret_origin {
            Some(SecretOrigin::File(path)) => {
                lines.push(format!("- Secret read from `{}`", path.display()))
            }
            Some(SecretOrigin::Generated(path)) => {
                lines.push(format!("- Secret generated into `{}`", path.display()))
            }
            Some(SecretOrigin::Literal) | None => {}
        }
        lines.push(format!(
            "- Saved anonymized file as: `{}`",
            self.output_path.display()
        ));

        lines
    }
}
