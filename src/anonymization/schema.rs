//! Column planning for anonymized tables
//!
//! The column layout is resolved once from the header row, before any row is
//! touched: which column carries the netid, which identifying columns are
//! dropped, and the order of the output columns.

use crate::config::ColumnsConfig;
use crate::domain::{AnonCsvError, Auid, Result};
use csv::ByteRecord;

/// Resolved column layout for one input table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    identifier_index: usize,
    identifier_column: String,
    removed_columns: Vec<String>,
    kept_indexes: Vec<usize>,
    output_headers: Vec<String>,
}

impl ColumnPlan {
    /// Plan the output layout for `headers`
    ///
    /// # Errors
    ///
    /// Returns a schema error if no identifier column (or alias) is present,
    /// or if the auid column name collides with a column that is kept.
    pub fn from_headers(headers: &[String], columns: &ColumnsConfig) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let (identifier_index, identifier_column) = std::iter::once(&columns.identifier)
            .chain(columns.identifier_aliases.iter())
            .find_map(|name| position(name.as_str()).map(|idx| (idx, name.clone())))
            .ok_or_else(|| {
                AnonCsvError::Schema(format!(
                    "Input has no `{}` column (aliases tried: {})",
                    columns.identifier,
                    if columns.identifier_aliases.is_empty() {
                        "none".to_string()
                    } else {
                        columns.identifier_aliases.join(", ")
                    }
                ))
            })?;

        // The identifier and every alias present are removed even when absent from `remove`
        let mut removed_columns: Vec<String> = Vec::new();
        for name in columns
            .remove
            .iter()
            .chain(std::iter::once(&columns.identifier))
            .chain(columns.identifier_aliases.iter())
        {
            if position(name.as_str()).is_some() && !removed_columns.contains(name) {
                removed_columns.push(name.clone());
            }
        }

        let kept_indexes: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !removed_columns.contains(h))
            .map(|(idx, _)| idx)
            .collect();

        if kept_indexes
            .iter()
            .any(|&idx| headers[idx] == columns.auid_column)
        {
            return Err(AnonCsvError::Schema(format!(
                "Input already has a `{}` column",
                columns.auid_column
            )));
        }

        let output_headers = std::iter::once(columns.auid_column.clone())
            .chain(kept_indexes.iter().map(|&idx| headers[idx].clone()))
            .collect();

        Ok(Self {
            identifier_index,
            identifier_column,
            removed_columns,
            kept_indexes,
            output_headers,
        })
    }

    /// Name of the column the netid is read from
    pub fn identifier_column(&self) -> &str {
        &self.identifier_column
    }

    /// Identifying columns dropped from the output
    pub fn removed_columns(&self) -> &[String] {
        &self.removed_columns
    }

    /// Output header row, auid column first
    pub fn output_headers(&self) -> &[String] {
        &self.output_headers
    }

    /// Raw netid field of a record
    pub fn identifier_field<'a>(&self, record: &'a ByteRecord) -> &'a [u8] {
        record.get(self.identifier_index).unwrap_or_default()
    }

    /// Build the output record: the auid followed by the kept fields
    pub fn project(&self, record: &ByteRecord, auid: &Auid) -> ByteRecord {
        let mut out = ByteRecord::with_capacity(
            record.as_slice().len() + auid.as_str().len(),
            self.output_headers.len(),
        );
        out.push_field(auid.as_str().as_bytes());
        for &idx in &self.kept_indexes {
            out.push_field(record.get(idx).unwrap_or_default());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plan_with_netid() {
        let plan = ColumnPlan::from_headers(
            &headers(&["netid", "Last Name", "First Name", "score", "UIN", "section"]),
            &ColumnsConfig::default(),
        )
        .unwrap();

        assert_eq!(plan.identifier_column(), "netid");
        assert_eq!(plan.removed_columns(), ["netid", "Last Name", "First Name", "UIN"]);
        assert_eq!(plan.output_headers(), ["auid", "score", "section"]);
    }

    #[test]
    fn test_plan_falls_back_to_username() {
        let plan = ColumnPlan::from_headers(
            &headers(&["Student ID", "Username", "grade"]),
            &ColumnsConfig::default(),
        )
        .unwrap();

        assert_eq!(plan.identifier_column(), "Username");
        assert_eq!(plan.removed_columns(), ["Username", "Student ID"]);
        assert_eq!(plan.output_headers(), ["auid", "grade"]);
    }

    #[test]
    fn test_plan_prefers_netid_over_alias() {
        let plan = ColumnPlan::from_headers(
            &headers(&["Username", "netid", "grade"]),
            &ColumnsConfig::default(),
        )
        .unwrap();

        assert_eq!(plan.identifier_column(), "netid");
        assert_eq!(plan.output_headers(), ["auid", "grade"]);
    }

    #[test]
    fn test_plan_removes_identifier_outside_remove_list() {
        let columns = ColumnsConfig {
            identifier: "email".to_string(),
            remove: Vec::new(),
            ..ColumnsConfig::default()
        };
        let plan = ColumnPlan::from_headers(&headers(&["email", "grade"]), &columns).unwrap();
        assert_eq!(plan.removed_columns(), ["email"]);
        assert_eq!(plan.output_headers(), ["auid", "grade"]);
    }

    #[test]
    fn test_plan_removes_unused_aliases() {
        let columns = ColumnsConfig {
            remove: Vec::new(),
            ..ColumnsConfig::default()
        };
        let plan =
            ColumnPlan::from_headers(&headers(&["netid", "Username", "grade"]), &columns).unwrap();

        assert_eq!(plan.identifier_column(), "netid");
        assert_eq!(plan.removed_columns(), ["netid", "Username"]);
        assert_eq!(plan.output_headers(), ["auid", "grade"]);
    }

    #[test]
    fn test_plan_missing_identifier() {
        let err = ColumnPlan::from_headers(&headers(&["name", "grade"]), &ColumnsConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnonCsvError::Schema(_)));
        assert!(err.to_string().contains("netid"));
        assert!(err.to_string().contains("Username"));
    }

    #[test]
    fn test_plan_auid_collision() {
        let err = ColumnPlan::from_headers(
            &headers(&["netid", "auid", "grade"]),
            &ColumnsConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnonCsvError::Schema(_)));
    }

    #[test]
    fn test_project_record() {
        let plan = ColumnPlan::from_headers(
            &headers(&["score", "netid", "First Name", "section"]),
            &ColumnsConfig::default(),
        )
        .unwrap();

        let record = ByteRecord::from(vec!["91", "alice", "Alice", "AL1"]);
        assert_eq!(plan.identifier_field(&record), b"alice");

        let auid = Auid::new("JZ-gfzhz-4ui5ey").unwrap();
        let projected = plan.project(&record, &auid);
        assert_eq!(projected, ByteRecord::from(vec!["JZ-gfzhz-4ui5ey", "91", "AL1"]));
    }
}
