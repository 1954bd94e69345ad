//! Gross pay aggregation.
//!
//! This module holds the single total-pay formula. Every surface that shows
//! a total (calculate responses, export rows, summary views) goes through
//! [`calculate_gross_pay`]; duplicate formulas are a correctness bug.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::OvertimeRates;
use crate::models::EmployeePayRecord;

/// The component breakdown of one employee's gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossPay {
    /// Regular hours at the base rate.
    pub regular_pay: Decimal,
    /// Overtime hours at the overtime multiplier.
    pub overtime_pay: Decimal,
    /// Double-overtime hours at the double-overtime multiplier.
    pub double_overtime_pay: Decimal,
    /// Distributed tips.
    pub tips: Decimal,
    /// Applied break penalty hours at the base rate.
    pub break_penalty_pay: Decimal,
    /// Sick leave hours at the base rate.
    pub sick_leave_pay: Decimal,
    /// The sum of all components.
    pub total: Decimal,
}

/// Computes an employee's gross pay from their pay record.
///
/// Pure function, no side effects:
/// `regular*rate + overtime*rate*1.5 + double_overtime*rate*2 + tips +
/// break_penalty_hours*rate + sick_leave_hours*rate` (multipliers from
/// policy).
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_gross_pay;
/// use payroll_engine::config::OvertimeRates;
/// use payroll_engine::models::EmployeePayRecord;
/// use rust_decimal::Decimal;
///
/// let record = EmployeePayRecord {
///     employee_key: "gus_1042".to_string(),
///     hourly_rate: Decimal::new(2000, 2),
///     regular_hours: Decimal::new(300, 1),
///     overtime_hours: Decimal::new(50, 1),
///     double_overtime_hours: Decimal::ZERO,
///     tips: Decimal::new(4533, 2),
///     break_penalty_hours: Decimal::ONE,
///     sick_leave_hours: Decimal::new(40, 1),
/// };
///
/// let pay = calculate_gross_pay(&record, &OvertimeRates::default());
/// assert_eq!(pay.total, Decimal::new(89533, 2)); // 895.33
/// ```
pub fn calculate_gross_pay(record: &EmployeePayRecord, rates: &OvertimeRates) -> GrossPay {
    let regular_pay = record.regular_hours * record.hourly_rate;
    let overtime_pay = record.overtime_hours * record.hourly_rate * rates.overtime_multiplier;
    let double_overtime_pay =
        record.double_overtime_hours * record.hourly_rate * rates.double_overtime_multiplier;
    let break_penalty_pay = record.break_penalty_hours * record.hourly_rate;
    let sick_leave_pay = record.sick_leave_hours * record.hourly_rate;

    GrossPay {
        regular_pay,
        overtime_pay,
        double_overtime_pay,
        tips: record.tips,
        break_penalty_pay,
        sick_leave_pay,
        total: regular_pay
            + overtime_pay
            + double_overtime_pay
            + record.tips
            + break_penalty_pay
            + sick_leave_pay,
    }
}
