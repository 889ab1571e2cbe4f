//! Domain error types
//!
//! This module defines the error hierarchy for anon-csv. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main anon-csv error type
///
/// This is the primary error type used throughout the library.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum AnonCsvError {
    /// Configuration-related errors (including conflicting secret sources)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid input passed to the identifier anonymizer
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Invalid input attributed to a specific data row (1-based)
    #[error("Input error in row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: InputError,
    },

    /// Table layout does not fit the anonymization schema
    #[error("Schema error: {0}")]
    Schema(String),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A derivation task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

impl AnonCsvError {
    /// Whether the error originates from the configuration rather than the data
    pub fn is_configuration(&self) -> bool {
        matches!(self, AnonCsvError::Configuration(_))
    }
}

/// Identifier anonymizer input errors
///
/// Raised immediately by the derivation functions; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The identifier is empty
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// The secret is empty
    #[error("secret must not be empty")]
    EmptySecret,

    /// The identifier is not valid UTF-8
    #[error("identifier is not valid UTF-8: {0}")]
    InvalidEncoding(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for AnonCsvError {
    fn from(err: std::io::Error) -> Self {
        AnonCsvError::Io(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for AnonCsvError {
    fn from(err: csv::Error) -> Self {
        AnonCsvError::Csv(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AnonCsvError {
    fn from(err: serde_json::Error) -> Self {
        AnonCsvError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AnonCsvError {
    fn from(err: toml::de::Error) -> Self {
        AnonCsvError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from blocking task failures
impl From<tokio::task::JoinError> for AnonCsvError {
    fn from(err: tokio::task::JoinError) -> Self {
        AnonCsvError::Task(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anon_csv_error_display() {
        let err = AnonCsvError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_input_error_conversion() {
        let err: AnonCsvError = InputError::EmptyIdentifier.into();
        assert!(matches!(err, AnonCsvError::Input(InputError::EmptyIdentifier)));
        assert_eq!(err.to_string(), "Input error: identifier must not be empty");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_invalid_row_display() {
        let err = AnonCsvError::InvalidRow {
            row: 7,
            source: InputError::EmptyIdentifier,
        };
        assert_eq!(
            err.to_string(),
            "Input error in row 7: identifier must not be empty"
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("identifier must not be empty"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: AnonCsvError = io_err.into();
        assert!(matches!(err, AnonCsvError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: AnonCsvError = json_err.into();
        assert!(matches!(err, AnonCsvError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: AnonCsvError = toml_err.into();
        assert!(matches!(err, AnonCsvError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = AnonCsvError::Schema("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let input = InputError::EmptySecret;
        let _: &dyn std::error::Error = &input;
    }
}
