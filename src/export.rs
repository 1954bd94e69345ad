//! Payroll export formatting.
//!
//! This module maps aggregated per-employee pay records into the
//! fixed-column interchange format consumed by the external payroll
//! provider. The column order and two-decimal formatting are a boundary
//! contract and must match exactly.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeePayRecord, EmployeeProfile, PayPeriod};

/// The exact header row of the provider import file.
pub const EXPORT_HEADER: &str = "last_name,first_name,gusto_employee_id,regular_hours,overtime_hours,double_overtime_hours,custom_earning_break_hour_pay,sick_hours,paycheck_tips";

/// One exportable row: identity, pay record, and the operator's selection.
#[derive(Debug, Clone)]
pub struct ExportRow {
    /// Identity and rate data for the employee.
    pub profile: EmployeeProfile,
    /// The aggregated pay record for the period.
    pub record: EmployeePayRecord,
    /// Whether the operator selected this row for export.
    pub selected: bool,
}

/// A rendered provider import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GustoExport {
    /// The suggested download file name.
    pub file_name: String,
    /// The complete file content: header plus one row per selected
    /// employee, newline separated.
    pub content: String,
}

/// Formats a number with exactly two decimal places, half away from zero.
fn format_two_decimals(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn format_mmddyy(date: NaiveDate) -> String {
    date.format("%m%d%y").to_string()
}

/// Builds the provider import file from the selected rows.
///
/// Hour fields export to two decimals; `custom_earning_break_hour_pay` is
/// the currency amount `break_penalty_hours * hourly_rate`. First and last
/// name split from the profile's "First Last" display name.
///
/// # Errors
///
/// Returns [`PayrollError::NoRowsSelected`] when no row is selected — the
/// operator must pick at least one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::export::{ExportRow, build_export, EXPORT_HEADER};
/// use payroll_engine::models::{EmployeePayRecord, EmployeeProfile, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let row = ExportRow {
///     profile: EmployeeProfile {
///         employee_key: "gus_1042".to_string(),
///         name: "Maria Lopez".to_string(),
///         job_title: "Barista".to_string(),
///         hourly_rate: Decimal::new(2000, 2),
///         sick_leave_hours: Decimal::ZERO,
///     },
///     record: EmployeePayRecord {
///         employee_key: "gus_1042".to_string(),
///         hourly_rate: Decimal::new(2000, 2),
///         regular_hours: Decimal::new(300, 1),
///         overtime_hours: Decimal::ZERO,
///         double_overtime_hours: Decimal::ZERO,
///         tips: Decimal::new(4533, 2),
///         break_penalty_hours: Decimal::ZERO,
///         sick_leave_hours: Decimal::ZERO,
///     },
///     selected: true,
/// };
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
/// };
///
/// let export = build_export(&[row], "Downtown", &period).unwrap();
/// assert!(export.content.starts_with(EXPORT_HEADER));
/// assert_eq!(export.file_name, "GustoImport_Downtown(060225-061525).csv");
/// ```
pub fn build_export(
    rows: &[ExportRow],
    location_name: &str,
    period: &PayPeriod,
) -> PayrollResult<GustoExport> {
    let selected: Vec<&ExportRow> = rows.iter().filter(|row| row.selected).collect();
    if selected.is_empty() {
        return Err(PayrollError::NoRowsSelected);
    }

    let mut lines = Vec::with_capacity(selected.len() + 1);
    lines.push(EXPORT_HEADER.to_string());

    for row in selected {
        let (first_name, last_name) = row.profile.first_last_name();
        let break_hour_pay = row.record.break_penalty_hours * row.record.hourly_rate;

        lines.push(
            [
                last_name,
                first_name,
                row.record.employee_key.clone(),
                format_two_decimals(row.record.regular_hours),
                format_two_decimals(row.record.overtime_hours),
                format_two_decimals(row.record.double_overtime_hours),
                format_two_decimals(break_hour_pay),
                format_two_decimals(row.record.sick_leave_hours),
                format_two_decimals(row.record.tips),
            ]
            .join(","),
        );
    }

    let file_name = format!(
        "GustoImport_{}({}-{}).csv",
        location_name,
        format_mmddyy(period.start_date),
        format_mmddyy(period.end_date)
    );

    Ok(GustoExport {
        file_name,
        content: lines.join("\n"),
    })
}
