//! Error types for the Payroll Computation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll computation.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Payroll Computation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::MalformedTime {
///     text: "25:99XM".to_string(),
/// };
/// assert_eq!(error.to_string(), "Malformed clock time: '25:99XM'");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// A clock-time string could not be parsed.
    #[error("Malformed clock time: '{text}'")]
    MalformedTime {
        /// The text that failed to parse.
        text: String,
    },

    /// A calendar-date string could not be parsed.
    #[error("Malformed date: '{text}'")]
    MalformedDate {
        /// The text that failed to parse.
        text: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// After penny redistribution the allocated tip total does not equal the
    /// distributable total. This indicates a bug in the allocator and is
    /// never swallowed.
    #[error("Tip reconciliation mismatch: expected {expected}, allocated {allocated}")]
    ReconciliationMismatch {
        /// The distributable tip total for the period.
        expected: Decimal,
        /// The total actually allocated across employees.
        allocated: Decimal,
    },

    /// The penalty store failed to read a record.
    #[error("Failed to read penalty record '{key}': {message}")]
    PersistenceRead {
        /// The store key that failed.
        key: String,
        /// A description of the read failure.
        message: String,
    },

    /// The penalty store failed to save a record. Callers must treat the
    /// toggle as not having taken effect.
    #[error("Failed to write penalty record '{key}': {message}")]
    PersistenceWrite {
        /// The store key that failed.
        key: String,
        /// A description of the write failure.
        message: String,
    },

    /// An export was requested with no rows selected.
    #[error("No rows selected for export")]
    NoRowsSelected,
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_malformed_time_displays_text() {
        let error = PayrollError::MalformedTime {
            text: "nonsense".to_string(),
        };
        assert_eq!(error.to_string(), "Malformed clock time: 'nonsense'");
    }

    #[test]
    fn test_malformed_date_displays_text() {
        let error = PayrollError::MalformedDate {
            text: "13/45/20".to_string(),
        };
        assert_eq!(error.to_string(), "Malformed date: '13/45/20'");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = PayrollError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_reconciliation_mismatch_displays_amounts() {
        let error = PayrollError::ReconciliationMismatch {
            expected: Decimal::from_str("100.00").unwrap(),
            allocated: Decimal::from_str("99.99").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Tip reconciliation mismatch: expected 100.00, allocated 99.99"
        );
    }

    #[test]
    fn test_persistence_write_displays_key_and_message() {
        let error = PayrollError::PersistenceWrite {
            key: "emp_042_2025-06-03".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to write penalty record 'emp_042_2025-06-03': disk full"
        );
    }

    #[test]
    fn test_no_rows_selected_display() {
        assert_eq!(
            PayrollError::NoRowsSelected.to_string(),
            "No rows selected for export"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_malformed_time() -> PayrollResult<()> {
            Err(PayrollError::MalformedTime {
                text: "bad".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_malformed_time()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
