//! Response types for the Payroll Computation Engine API.
//!
//! This module defines the calculation response envelope plus the error
//! response structures and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::GrossPay;
use crate::error::PayrollError;
use crate::models::{BreakAssessment, BreakPenalty, ComputationWarning, EmployeePayRecord, PayPeriod};

/// The complete result of one pay-period computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Correlation id for this computation.
    pub calculation_id: Uuid,
    /// When the computation ran.
    pub timestamp: DateTime<Utc>,
    /// The pay period computed.
    pub pay_period: PayPeriod,
    /// One record per employee in the directory slice.
    pub records: Vec<PayRecordResponse>,
    /// Break assessments for operator review, applied flags hydrated from
    /// the ledger.
    pub break_assessments: Vec<BreakAssessment>,
    /// Recoverable conditions encountered while computing.
    pub warnings: Vec<ComputationWarning>,
    /// Aggregated totals across all records.
    pub totals: PayRunTotals,
    /// The total computation duration in microseconds.
    pub duration_us: u64,
}

/// One employee's computed pay for the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRecordResponse {
    /// Display name from the directory.
    pub name: String,
    /// Job title from the directory.
    pub job_title: String,
    /// The aggregated pay record.
    pub record: EmployeePayRecord,
    /// The gross pay breakdown derived from the record.
    pub gross_pay: GrossPay,
}

/// Aggregated totals for a pay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRunTotals {
    /// Sum of every employee's gross total.
    pub gross_pay: Decimal,
    /// Tips distributed across the period.
    pub tips_distributed: Decimal,
    /// Tips left undistributed (days with no eligible workers).
    pub tips_undistributed: Decimal,
    /// Applied break penalty hours across all employees.
    pub applied_penalty_hours: Decimal,
}

/// Response for the penalty apply/unapply endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyToggleResponse {
    /// The record state after the toggle.
    pub penalty: BreakPenalty,
    /// The employee's total applied penalty hours after the toggle.
    pub applied_hours_total: Decimal,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        match error {
            PayrollError::MalformedTime { text } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MALFORMED_TIME",
                    format!("Malformed clock time: '{}'", text),
                    "Clock times must be 'H:MM AM/PM' or 24-hour 'H:MM'",
                ),
            },
            PayrollError::MalformedDate { text } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MALFORMED_DATE",
                    format!("Malformed date: '{}'", text),
                    "Dates must be 'YYYY-MM-DD' or 'M/D/YYYY'",
                ),
            },
            PayrollError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            PayrollError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            PayrollError::ReconciliationMismatch {
                expected,
                allocated,
            } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "RECONCILIATION_MISMATCH",
                    format!(
                        "Tip reconciliation mismatch: expected {}, allocated {}",
                        expected, allocated
                    ),
                    "The allocated tip total does not equal the distributable total",
                ),
            },
            PayrollError::PersistenceRead { key, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "PERSISTENCE_ERROR",
                    format!("Failed to read penalty record '{}'", key),
                    message,
                ),
            },
            PayrollError::PersistenceWrite { key, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "PERSISTENCE_ERROR",
                    format!(
                        "Failed to write penalty record '{}'; the toggle did not take effect",
                        key
                    ),
                    message,
                ),
            },
            PayrollError::NoRowsSelected => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "NO_ROWS_SELECTED",
                    "Select at least one employee to export",
                ),
            },
        }
    }
}
