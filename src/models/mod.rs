//! Data models for the Payroll Computation Engine.
//!
//! This module contains all the data structures consumed and produced by the
//! engine: timesheet entries, daily tip totals, employee profiles, break
//! penalties, pay periods, and per-employee pay records.

mod employee;
mod pay_period;
mod pay_record;
mod penalty;
mod timesheet;
mod tips;

pub use employee::EmployeeProfile;
pub use pay_period::PayPeriod;
pub use pay_record::{ComputationWarning, EmployeePayRecord};
pub use penalty::{BreakAssessment, BreakPenalty, penalty_key};
pub use timesheet::{BREAK_MINUTES_THRESHOLD, TimesheetEntry, group_by_employee_day};
pub use tips::{DailyTipTotal, merge_daily_totals, parse_tip_amount};
