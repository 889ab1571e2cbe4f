//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Console output on stderr
//! - Local file logging with rotation, optionally as JSON
//!
//! Secrets and raw netids are never logged; diagnostics carry column names,
//! counts and paths.
//!
//! # Example
//!
//! ```no_run
//! use anon_csv::logging::init_logging;
//! use anon_csv::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(rows = 42, "Processed rows");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use anon_csv::log_error_with_context;
/// use anon_csv::domain::AnonCsvError;
///
/// let error = AnonCsvError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::AnonCsvError;

    #[test]
    fn test_log_error_with_context_without_subscriber() {
        let error = AnonCsvError::Schema("missing column".to_string());
        log_error_with_context!(&error, "Failed to plan columns");
    }
}
