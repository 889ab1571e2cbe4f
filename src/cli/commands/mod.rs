//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod anonymize;
pub mod generate_secret;
pub mod validate;

use crate::domain::AnonCsvError;

/// Exit code for a failed run
///
/// - `2`: configuration error
/// - `3`: input, schema or CSV error
/// - `5`: fatal error
pub fn exit_code(error: &AnonCsvError) -> i32 {
    match error {
        AnonCsvError::Configuration(_) => 2,
        AnonCsvError::Input(_)
        | AnonCsvError::InvalidRow { .. }
        | AnonCsvError::Schema(_)
        | AnonCsvError::Csv(_) => 3,
        AnonCsvError::Serialization(_) | AnonCsvError::Io(_) | AnonCsvError::Task(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InputError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&AnonCsvError::Configuration("x".into())), 2);
        assert_eq!(
            exit_code(&AnonCsvError::InvalidRow {
                row: 3,
                source: InputError::EmptyIdentifier
            }),
            3
        );
        assert_eq!(exit_code(&AnonCsvError::Schema("x".into())), 3);
        assert_eq!(exit_code(&AnonCsvError::Csv("x".into())), 3);
        assert_eq!(exit_code(&AnonCsvError::Io("x".into())), 5);
        assert_eq!(exit_code(&AnonCsvError::Task("x".into())), 5);
    }
}
