//! CSV table reading and writing
//!
//! Headers must be UTF-8; data fields are kept as raw bytes so values in
//! columns that are not anonymized pass through unchanged.

use crate::domain::{AnonCsvError, Result};
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use std::path::Path;

/// An in-memory CSV table with a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<ByteRecord>,
}

impl Table {
    /// Read a CSV file with a header row
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the header row is not
    /// valid UTF-8, or a row has a different number of fields than the header.
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| AnonCsvError::Csv(format!("Failed to open {}: {}", path.display(), e)))?;

        let headers = reader
            .headers()
            .map_err(|e| AnonCsvError::Csv(format!("Invalid header row in {}: {}", path.display(), e)))?
            .iter()
            .map(String::from)
            .collect();

        let rows = reader
            .byte_records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    /// Write a header row and records to a CSV file, replacing any existing file
    pub fn write(path: &Path, headers: &[String], rows: &[ByteRecord]) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .from_path(path)
            .map_err(|e| AnonCsvError::Csv(format!("Failed to create {}: {}", path.display(), e)))?;

        writer.write_record(headers)?;
        for row in rows {
            writer.write_byte_record(row)?;
        }
        writer.flush()?;

        Ok(())
    }
}
