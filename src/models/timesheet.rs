//! Timesheet entry model and grouping.
//!
//! This module defines the TimesheetEntry struct for one continuous clocked
//! shift segment as ingested from the scheduling provider, together with the
//! grouping used by break analysis.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reported break values at or above this magnitude are minutes; below it
/// they are already hours. The heuristic assumes no break exceeds 10 hours.
pub const BREAK_MINUTES_THRESHOLD: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// One continuous clocked shift segment.
///
/// The hour buckets (`regular_hours`, `overtime_hours`,
/// `double_overtime_hours`) arrive pre-split into tiers by the upstream
/// timesheet and sum to the segment's total worked hours. Multiple entries
/// may share `(employee_key, date)` for split shifts; break analysis groups
/// them with [`group_by_employee_day`] first.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TimesheetEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = TimesheetEntry {
///     employee_key: "gus_1042".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
///     clock_in: "9:00AM".to_string(),
///     clock_out: "5:30PM".to_string(),
///     break_reported: Decimal::new(30, 0),
///     regular_hours: Decimal::new(80, 1),
///     overtime_hours: Decimal::ZERO,
///     double_overtime_hours: Decimal::ZERO,
/// };
/// assert_eq!(entry.worked_hours(), Decimal::new(80, 1)); // 8.0
/// assert_eq!(entry.break_hours(), Decimal::new(5, 1));   // 30 minutes
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// Stable identifier shared with the external payroll provider.
    pub employee_key: String,
    /// The calendar day of the segment (pay-period-local).
    pub date: NaiveDate,
    /// Wall-clock clock-in time of day (e.g. "9:29AM" or "14:30").
    pub clock_in: String,
    /// Wall-clock clock-out time of day. Earlier than `clock_in` means the
    /// shift crossed midnight.
    pub clock_out: String,
    /// Reported break, in minutes or hours depending on magnitude.
    #[serde(default)]
    pub break_reported: Decimal,
    /// Hours paid at the base rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Hours paid at the double-overtime rate.
    pub double_overtime_hours: Decimal,
}

impl TimesheetEntry {
    /// Total worked hours for the segment (sum of the tier buckets).
    pub fn worked_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours + self.double_overtime_hours
    }

    /// The reported break normalized to hours.
    ///
    /// Values below [`BREAK_MINUTES_THRESHOLD`] are already hours; values at
    /// or above it are minutes and divided by 60.
    pub fn break_hours(&self) -> Decimal {
        if self.break_reported < BREAK_MINUTES_THRESHOLD {
            self.break_reported
        } else {
            self.break_reported / Decimal::new(60, 0)
        }
    }
}

/// Groups timesheet entries by `(employee_key, date)`.
///
/// Split shifts (multiple segments for the same employee and day) land in
/// the same group. The BTreeMap keeps iteration deterministic for
/// reproducible warnings and allocation order.
pub fn group_by_employee_day(
    entries: &[TimesheetEntry],
) -> BTreeMap<(String, NaiveDate), Vec<&TimesheetEntry>> {
    let mut groups: BTreeMap<(String, NaiveDate), Vec<&TimesheetEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry((entry.employee_key.clone(), entry.date))
            .or_default()
            .push(entry);
    }
    groups
}
