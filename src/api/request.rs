//! Request types for the Payroll Computation Engine API.
//!
//! This module defines the JSON request structures for the engine's
//! endpoints. Calendar dates arrive as text in either `YYYY-MM-DD` or
//! `M/D/YYYY` form and are resolved into typed dates at this boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_flexible_date;
use crate::error::PayrollError;
use crate::export::ExportRow;
use crate::models::{
    DailyTipTotal, EmployeePayRecord, EmployeeProfile, PayPeriod, TimesheetEntry, parse_tip_amount,
};

/// Request body for the `/payroll/calculate` endpoint.
///
/// Contains everything one pay-period computation needs: the period window,
/// the employee directory slice, the raw timesheet, and the uploaded daily
/// tip totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The pay period for the computation.
    pub pay_period: PayPeriodRequest,
    /// The employees known for this location and period.
    pub employees: Vec<EmployeeProfileRequest>,
    /// Raw timesheet rows for the period.
    pub timesheet: Vec<TimesheetEntryRequest>,
    /// Daily tip totals aggregated from the uploaded spreadsheets.
    #[serde(default)]
    pub daily_tips: Vec<DailyTipRequest>,
}

/// Pay period information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayPeriodRequest {
    /// The start date of the pay period (inclusive).
    pub start_date: String,
    /// The end date of the pay period (inclusive).
    pub end_date: String,
}

impl TryFrom<PayPeriodRequest> for PayPeriod {
    type Error = PayrollError;

    fn try_from(req: PayPeriodRequest) -> Result<Self, Self::Error> {
        Ok(PayPeriod {
            start_date: parse_flexible_date(&req.start_date)?,
            end_date: parse_flexible_date(&req.end_date)?,
        })
    }
}

/// Employee directory information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeProfileRequest {
    /// Stable identifier shared with the external payroll provider.
    pub employee_key: String,
    /// Display name in "First Last" form.
    pub name: String,
    /// The employee's job title.
    pub job_title: String,
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Operator-entered sick leave hours for the period.
    #[serde(default)]
    pub sick_leave_hours: Decimal,
}

impl From<EmployeeProfileRequest> for EmployeeProfile {
    fn from(req: EmployeeProfileRequest) -> Self {
        EmployeeProfile {
            employee_key: req.employee_key,
            name: req.name,
            job_title: req.job_title,
            hourly_rate: req.hourly_rate,
            sick_leave_hours: req.sick_leave_hours,
        }
    }
}

/// Timesheet row in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetEntryRequest {
    /// Stable identifier shared with the external payroll provider.
    pub employee_key: String,
    /// The calendar day, `YYYY-MM-DD` or `M/D/YYYY`.
    pub date: String,
    /// Wall-clock clock-in time of day.
    pub clock_in: String,
    /// Wall-clock clock-out time of day.
    pub clock_out: String,
    /// Reported break, minutes or hours depending on magnitude.
    #[serde(default)]
    pub break_reported: Decimal,
    /// Hours paid at the base rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Hours paid at the double-overtime rate.
    pub double_overtime_hours: Decimal,
}

impl TryFrom<TimesheetEntryRequest> for TimesheetEntry {
    type Error = PayrollError;

    fn try_from(req: TimesheetEntryRequest) -> Result<Self, Self::Error> {
        Ok(TimesheetEntry {
            employee_key: req.employee_key,
            date: parse_flexible_date(&req.date)?,
            clock_in: req.clock_in,
            clock_out: req.clock_out,
            break_reported: req.break_reported,
            regular_hours: req.regular_hours,
            overtime_hours: req.overtime_hours,
            double_overtime_hours: req.double_overtime_hours,
        })
    }
}

/// One daily tip total in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTipRequest {
    /// The calendar day, `YYYY-MM-DD` or `M/D/YYYY`.
    pub date: String,
    /// The tip amount: a number, a numeric string, or raw spreadsheet text
    /// such as `"$184.50"`.
    pub amount: TipAmountRequest,
}

/// A tip amount as uploaded: already numeric, or text needing cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TipAmountRequest {
    /// A clean decimal amount.
    Amount(Decimal),
    /// Raw spreadsheet text; non-numeric characters are stripped before
    /// conversion.
    Text(String),
}

impl TryFrom<DailyTipRequest> for DailyTipTotal {
    type Error = PayrollError;

    fn try_from(req: DailyTipRequest) -> Result<Self, Self::Error> {
        let amount = match req.amount {
            TipAmountRequest::Amount(amount) => amount,
            TipAmountRequest::Text(text) => parse_tip_amount(&text),
        };
        Ok(DailyTipTotal {
            date: parse_flexible_date(&req.date)?,
            amount,
        })
    }
}

/// Request body for the `/penalties/apply` and `/penalties/unapply`
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyToggleRequest {
    /// Stable identifier shared with the external payroll provider.
    pub employee_key: String,
    /// The day the penalty was assessed, `YYYY-MM-DD` or `M/D/YYYY`.
    pub date: String,
    /// The penalty hours from the assessment being toggled.
    pub penalty_hours: Decimal,
}

/// Request body for the `/payroll/export` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// The location label embedded in the export file name.
    pub location_name: String,
    /// The pay period the export covers.
    pub pay_period: PayPeriodRequest,
    /// The reviewed rows, with the operator's selections.
    pub rows: Vec<ExportRowRequest>,
}

/// One reviewed row in an export request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRowRequest {
    /// Identity and rate data for the employee.
    pub employee: EmployeeProfileRequest,
    /// The aggregated pay numbers for the period.
    pub record: PayRecordRequest,
    /// Whether the operator selected this row for export.
    #[serde(default)]
    pub selected: bool,
}

/// Aggregated pay numbers in an export request.
///
/// The hourly rate and employee key come from the accompanying profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRecordRequest {
    /// Hours paid at the base rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Hours paid at the double-overtime rate.
    pub double_overtime_hours: Decimal,
    /// Distributed tip amount.
    pub tips: Decimal,
    /// Applied break penalty hours.
    #[serde(default)]
    pub break_penalty_hours: Decimal,
    /// Sick leave hours.
    #[serde(default)]
    pub sick_leave_hours: Decimal,
}

impl From<ExportRowRequest> for ExportRow {
    fn from(req: ExportRowRequest) -> Self {
        let profile: EmployeeProfile = req.employee.into();
        let record = EmployeePayRecord {
            employee_key: profile.employee_key.clone(),
            hourly_rate: profile.hourly_rate,
            regular_hours: req.record.regular_hours,
            overtime_hours: req.record.overtime_hours,
            double_overtime_hours: req.record.double_overtime_hours,
            tips: req.record.tips,
            break_penalty_hours: req.record.break_penalty_hours,
            sick_leave_hours: req.record.sick_leave_hours,
        };
        ExportRow {
            profile,
            record,
            selected: req.selected,
        }
    }
}
