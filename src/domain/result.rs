//! Result type alias for anon-csv

use super::errors::AnonCsvError;

/// Result type alias for anon-csv operations
///
/// # Examples
///
/// ```
/// use anon_csv::domain::result::Result;
/// use anon_csv::domain::errors::AnonCsvError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AnonCsvError::Schema("missing netid column".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AnonCsvError>;
