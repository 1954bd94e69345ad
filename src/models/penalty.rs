//! Break penalty models.
//!
//! This module defines the persisted [`BreakPenalty`] record and the richer
//! [`BreakAssessment`] emitted by the detector for operator review.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Builds the composite store key for a penalty record.
///
/// Keyed by `employee_key` and date rather than by any generated row id, so
/// reloading the timesheet never loses an applied flag.
///
/// # Example
///
/// ```
/// use payroll_engine::models::penalty_key;
/// use chrono::NaiveDate;
///
/// let key = penalty_key("gus_1042", NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
/// assert_eq!(key, "gus_1042_2025-06-03");
/// ```
pub fn penalty_key(employee_key: &str, date: NaiveDate) -> String {
    format!("{}_{}", employee_key, date)
}

/// The persisted break penalty record.
///
/// Created by the detector when a shortfall is found; `is_applied` starts
/// `false` and is toggled by explicit operator action. Only applied
/// penalties feed into gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPenalty {
    /// Stable identifier shared with the external payroll provider.
    pub employee_key: String,
    /// The day the shortfall occurred.
    pub date: NaiveDate,
    /// Penalty hours owed for the shortfall.
    pub penalty_hours: Decimal,
    /// Whether the operator has applied this penalty to the pay run.
    pub is_applied: bool,
}

impl BreakPenalty {
    /// The composite store key for this record.
    pub fn storage_key(&self) -> String {
        penalty_key(&self.employee_key, self.date)
    }
}

/// One employee-day break analysis as shown to the operator.
///
/// Carries the diagnostic fields behind the penalty decision alongside the
/// persisted ones, so the review tab can show how the shortfall was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakAssessment {
    /// Stable identifier shared with the external payroll provider.
    pub employee_key: String,
    /// The day analyzed.
    pub date: NaiveDate,
    /// Earliest clock-in across the day's segments.
    pub clock_in: String,
    /// Chronologically last clock-out across the day's segments.
    pub clock_out: String,
    /// Total worked hours for the day.
    pub worked_hours: Decimal,
    /// Break hours legally required for the worked hours.
    pub break_required: Decimal,
    /// Break hours actually taken (the more generous of the two estimates).
    pub break_taken: Decimal,
    /// Penalty hours owed.
    pub penalty_hours: Decimal,
    /// Whether the operator has applied this penalty.
    pub is_applied: bool,
}

impl BreakAssessment {
    /// Projects the assessment down to its persisted record.
    pub fn to_penalty(&self) -> BreakPenalty {
        BreakPenalty {
            employee_key: self.employee_key.clone(),
            date: self.date,
            penalty_hours: self.penalty_hours,
            is_applied: self.is_applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_penalty_key_format() {
        assert_eq!(
            penalty_key("gus_1042", date("2025-06-03")),
            "gus_1042_2025-06-03"
        );
    }

    #[test]
    fn test_storage_key_matches_helper() {
        let penalty = BreakPenalty {
            employee_key: "gus_1042".to_string(),
            date: date("2025-06-03"),
            penalty_hours: Decimal::new(10, 1),
            is_applied: false,
        };
        assert_eq!(penalty.storage_key(), penalty_key("gus_1042", penalty.date));
    }

    #[test]
    fn test_assessment_to_penalty_projection() {
        let assessment = BreakAssessment {
            employee_key: "gus_1042".to_string(),
            date: date("2025-06-03"),
            clock_in: "9:00AM".to_string(),
            clock_out: "8:15PM".to_string(),
            worked_hours: Decimal::new(105, 1),
            break_required: Decimal::new(10, 1),
            break_taken: Decimal::new(5, 1),
            penalty_hours: Decimal::new(10, 1),
            is_applied: true,
        };

        let penalty = assessment.to_penalty();
        assert_eq!(penalty.employee_key, "gus_1042");
        assert_eq!(penalty.penalty_hours, Decimal::new(10, 1));
        assert!(penalty.is_applied);
    }

    #[test]
    fn test_penalty_serialization_round_trip() {
        let penalty = BreakPenalty {
            employee_key: "gus_7".to_string(),
            date: date("2025-06-10"),
            penalty_hours: Decimal::new(20, 1),
            is_applied: true,
        };

        let json = serde_json::to_string(&penalty).unwrap();
        let deserialized: BreakPenalty = serde_json::from_str(&json).unwrap();
        assert_eq!(penalty, deserialized);
    }
}
