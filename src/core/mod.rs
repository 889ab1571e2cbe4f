//! Core business logic for anon-csv.
//!
//! # Modules
//!
//! - [`table`] - CSV reading and writing
//! - [`pipeline`] - Read, plan, derive, project and write one table
//! - [`summary`] - Run summary for operators and automation
//!
//! # Example
//!
//! ```rust,no_run
//! use anon_csv::anonymization::{Anonymizer, ProjectSecret};
//! use anon_csv::config::{secret_string, AnonCsvConfig};
//! use anon_csv::core::pipeline::{default_output_path, AnonymizationPipeline};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnonCsvConfig::default();
//! let secret = ProjectSecret::new(secret_string("topsecret".to_string()))?;
//!
//! let pipeline = AnonymizationPipeline::new(
//!     Anonymizer::new(secret),
//!     config.columns,
//!     config.processing,
//! );
//!
//! let input = Path::new("grades.csv");
//! let summary = pipeline.run(input, &default_output_path(input)).await?;
//! println!("Processed {} row(s)", summary.rows_processed);
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
pub mod summary;
pub mod table;

pub use pipeline::{default_output_path, AnonymizationPipeline, PreparedTable};
pub use summary::RunSummary;
pub use table::Table;
