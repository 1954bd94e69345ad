//! Per-employee pay record and computation warnings.
//!
//! This module contains the [`EmployeePayRecord`] aggregate consumed by the
//! export formatter and the [`ComputationWarning`] type collected while a
//! pay run is computed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The per-employee aggregate for one pay-period session.
///
/// Owned by the gross pay aggregation step for the duration of the session;
/// never persisted by the engine. The derived total comes only from
/// [`crate::calculation::calculate_gross_pay`] — no other formula may exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayRecord {
    /// Stable identifier shared with the external payroll provider.
    pub employee_key: String,
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Hours paid at the base rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Hours paid at the double-overtime rate.
    pub double_overtime_hours: Decimal,
    /// Distributed tip amount for the period.
    pub tips: Decimal,
    /// Applied break penalty hours, paid at the base rate.
    pub break_penalty_hours: Decimal,
    /// Sick leave hours, paid at the base rate.
    pub sick_leave_hours: Decimal,
}

/// A warning collected during a pay run.
///
/// Warnings report recoverable per-group conditions (skipped timesheet
/// groups, undistributed tip days) that must not block payroll for the rest
/// of the staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl ComputationWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_record_serialization_round_trip() {
        let record = EmployeePayRecord {
            employee_key: "gus_1042".to_string(),
            hourly_rate: Decimal::new(2000, 2),
            regular_hours: Decimal::new(300, 1),
            overtime_hours: Decimal::new(50, 1),
            double_overtime_hours: Decimal::ZERO,
            tips: Decimal::new(4533, 2),
            break_penalty_hours: Decimal::new(10, 1),
            sick_leave_hours: Decimal::new(40, 1),
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: EmployeePayRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_warning_constructor() {
        let warning = ComputationWarning::new(
            "NO_ELIGIBLE_WORKERS",
            "No eligible employees worked on 2025-06-03",
            "medium",
        );
        assert_eq!(warning.code, "NO_ELIGIBLE_WORKERS");
        assert_eq!(warning.severity, "medium");
    }
}
