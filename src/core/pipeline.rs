//! CSV anonymization pipeline
//!
//! The pipeline reads a table, plans its columns, derives one auid per row
//! and writes the anonymized table. Each derivation runs on tokio's blocking
//! pool; a semaphore bounds how many run at once. Rows are written in input
//! order regardless of completion order.

use crate::anonymization::{Anonymizer, ColumnPlan};
use crate::config::{ColumnsConfig, InvalidRowPolicy, ProcessingConfig};
use crate::core::summary::RunSummary;
use crate::core::table::Table;
use crate::domain::{AnonCsvError, Auid, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Suffix appended to the input file stem for the default output path
pub const OUTPUT_SUFFIX: &str = "-anonymized";

/// Default output path: `<dir>/<stem>-anonymized.csv` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.csv"))
}

/// An input table that has been read, planned and checked row by row
///
/// Preparing needs no secret, so a run can fail on its input before a
/// secret is resolved or generated.
#[derive(Debug)]
pub struct PreparedTable {
    input: PathBuf,
    table: Table,
    plan: ColumnPlan,
    accepted: Vec<usize>,
    rows_skipped: usize,
    started: Instant,
}

impl PreparedTable {
    /// Read `input`, plan its columns and check every netid against `policy`
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, has no identifier
    /// column, or contains an invalid netid under [`InvalidRowPolicy::Abort`].
    pub fn load(input: &Path, columns: &ColumnsConfig, policy: InvalidRowPolicy) -> Result<Self> {
        let started = Instant::now();
        tracing::info!(input = %input.display(), "Processing input file");

        let table = Table::read(input)?;
        let plan = ColumnPlan::from_headers(&table.headers, columns)?;
        tracing::debug!(
            identifier_column = plan.identifier_column(),
            columns = table.headers.len(),
            rows = table.rows.len(),
            "Column plan resolved"
        );

        let (accepted, rows_skipped) = validate_rows(&plan, &table, policy)?;

        Ok(Self {
            input: input.to_path_buf(),
            table,
            plan,
            accepted,
            rows_skipped,
            started,
        })
    }

    /// The column plan of the table
    pub fn plan(&self) -> &ColumnPlan {
        &self.plan
    }

    /// Rows that will be anonymized
    pub fn rows_accepted(&self) -> usize {
        self.accepted.len()
    }

    /// Rows dropped under the `skip` policy
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }
}

/// Check every netid up front; returns accepted row indexes and skip count
fn validate_rows(
    plan: &ColumnPlan,
    table: &Table,
    policy: InvalidRowPolicy,
) -> Result<(Vec<usize>, usize)> {
    let mut accepted = Vec::with_capacity(table.rows.len());
    let mut skipped = 0;

    for (idx, record) in table.rows.iter().enumerate() {
        match Anonymizer::validate_identifier(plan.identifier_field(record)) {
            Ok(_) => accepted.push(idx),
            Err(source) => match policy {
                InvalidRowPolicy::Abort => {
                    return Err(AnonCsvError::InvalidRow {
                        row: idx + 1,
                        source,
                    })
                }
                InvalidRowPolicy::Skip => {
                    tracing::warn!(row = idx + 1, reason = %source, "Skipping row");
                    skipped += 1;
                }
            },
        }
    }

    Ok((accepted, skipped))
}

/// Anonymizes CSV files with one project secret
pub struct AnonymizationPipeline {
    anonymizer: Anonymizer,
    columns: ColumnsConfig,
    processing: ProcessingConfig,
}

impl AnonymizationPipeline {
    /// Create a new pipeline
    pub fn new(
        anonymizer: Anonymizer,
        columns: ColumnsConfig,
        processing: ProcessingConfig,
    ) -> Self {
        Self {
            anonymizer,
            columns,
            processing,
        }
    }

    /// Anonymize `input` into `output`
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, has no identifier
    /// column, contains an invalid netid under the `abort` policy, or the
    /// output cannot be written. Nothing is written when an error occurs
    /// before the output stage.
    pub async fn run(&self, input: &Path, output: &Path) -> Result<RunSummary> {
        let prepared = PreparedTable::load(input, &self.columns, self.processing.on_invalid_row)?;
        self.run_prepared(prepared, output).await
    }

    /// Derive, project and write an already prepared table
    ///
    /// The table keeps the column plan it was prepared with.
    pub async fn run_prepared(&self, prepared: PreparedTable, output: &Path) -> Result<RunSummary> {
        let auids = self.derive_all(&prepared).await?;

        let rows: Vec<_> = prepared
            .accepted
            .iter()
            .zip(&auids)
            .map(|(&idx, auid)| prepared.plan.project(&prepared.table.rows[idx], auid))
            .collect();

        Table::write(output, prepared.plan.output_headers(), &rows)?;

        for column in prepared.plan.removed_columns() {
            tracing::info!(column = %column, "Removed column and data from anonymized output");
        }
        tracing::info!(
            rows = rows.len(),
            skipped = prepared.rows_skipped,
            "Processed rows"
        );
        tracing::info!(output = %output.display(), "Saved anonymized file");

        let mut summary = RunSummary::new(
            prepared.input.clone(),
            output.to_path_buf(),
            prepared.plan.identifier_column().to_string(),
        );
        summary.removed_columns = prepared.plan.removed_columns().to_vec();
        summary.rows_processed = rows.len();
        summary.rows_skipped = prepared.rows_skipped;

        Ok(summary.with_duration(prepared.started.elapsed()))
    }

    /// Derive the auids of the accepted rows, in input order
    async fn derive_all(&self, prepared: &PreparedTable) -> Result<Vec<Auid>> {
        let parallelism = self.processing.effective_parallelism();
        let permits = Arc::new(Semaphore::new(parallelism));
        let mut tasks = JoinSet::new();

        tracing::debug!(rows = prepared.accepted.len(), parallelism, "Deriving auids");

        for (slot, &idx) in prepared.accepted.iter().enumerate() {
            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|e| AnonCsvError::Task(e.to_string()))?;
            let anonymizer = self.anonymizer.clone();
            let netid = prepared
                .plan
                .identifier_field(&prepared.table.rows[idx])
                .to_vec();

            tasks.spawn_blocking(move || {
                let _permit = permit;
                let result = anonymizer
                    .anonymize_bytes(&netid)
                    .map_err(|source| AnonCsvError::InvalidRow {
                        row: idx + 1,
                        source,
                    });
                (slot, result)
            });
        }

        let mut auids: Vec<Option<Auid>> = vec![None; prepared.accepted.len()];
        while let Some(joined) = tasks.join_next().await {
            let (slot, result) = joined?;
            auids[slot] = Some(result?);
        }

        auids
            .into_iter()
            .map(|auid| {
                auid.ok_or_else(|| AnonCsvError::Task("missing derivation result".to_string()))
            })
            .collect()
    }
}
