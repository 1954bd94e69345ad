//! HTTP request handlers for the Payroll Computation Engine API.
//!
//! This module contains the handler functions for all API endpoints and the
//! pay-run orchestration they share: break penalty detection, tip pool
//! allocation, and gross pay aggregation over one pay period.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{allocate_tips, calculate_gross_pay, detect_break_penalties};
use crate::config::PayrollPolicy;
use crate::error::PayrollResult;
use crate::export::build_export;
use crate::models::{
    BreakAssessment, ComputationWarning, DailyTipTotal, EmployeePayRecord, EmployeeProfile,
    PayPeriod, TimesheetEntry,
};
use crate::store::PenaltyLedger;

use super::request::{CalculationRequest, ExportRequest, PenaltyToggleRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, PayRecordResponse, PayRunTotals,
    PenaltyToggleResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/export", post(export_handler))
        .route("/penalties/apply", post(apply_penalty_handler))
        .route("/penalties/unapply", post(unapply_penalty_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to an API error.
fn json_rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /payroll/calculate.
///
/// Runs the full pay-period computation: break penalty detection (hydrated
/// from the ledger), tip pool allocation, and gross pay aggregation.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(rejection, correlation_id);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    // Resolve boundary text into domain types
    let pay_period: PayPeriod = match request.pay_period.try_into() {
        Ok(period) => period,
        Err(err) => return error_response(err, correlation_id),
    };
    let profiles: Vec<EmployeeProfile> =
        request.employees.into_iter().map(Into::into).collect();
    let mut entries = Vec::with_capacity(request.timesheet.len());
    for row in request.timesheet {
        match TimesheetEntry::try_from(row) {
            Ok(entry) => entries.push(entry),
            Err(err) => return error_response(err, correlation_id),
        }
    }
    let mut daily_tips = Vec::with_capacity(request.daily_tips.len());
    for day in request.daily_tips {
        match DailyTipTotal::try_from(day) {
            Ok(total) => daily_tips.push(total),
            Err(err) => return error_response(err, correlation_id),
        }
    }

    let start_time = Instant::now();
    match perform_calculation(
        &pay_period,
        &profiles,
        &entries,
        &daily_tips,
        state.config().policy(),
        state.ledger(),
    ) {
        Ok(outcome) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                employees = outcome.records.len(),
                warnings = outcome.warnings.len(),
                duration_us = duration.as_micros() as u64,
                "Calculation completed"
            );
            let response = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                pay_period,
                records: outcome.records,
                break_assessments: outcome.break_assessments,
                warnings: outcome.warnings,
                totals: outcome.totals,
                duration_us: duration.as_micros() as u64,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for POST /payroll/export.
///
/// Renders the provider import file for the selected rows and returns it as
/// `text/csv` with a download file name.
async fn export_handler(
    State(_state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(rejection, correlation_id);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let pay_period: PayPeriod = match request.pay_period.try_into() {
        Ok(period) => period,
        Err(err) => return error_response(err, correlation_id),
    };
    let rows: Vec<_> = request.rows.into_iter().map(Into::into).collect();

    match build_export(&rows, &request.location_name, &pay_period) {
        Ok(export) => {
            info!(correlation_id = %correlation_id, file_name = %export.file_name, "Export built");
            (
                StatusCode::OK,
                [
                    (
                        header::CONTENT_TYPE,
                        "text/csv; charset=utf-8".to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", export.file_name),
                    ),
                ],
                export.content,
            )
                .into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /penalties/apply.
async fn apply_penalty_handler(
    State(state): State<AppState>,
    payload: Result<Json<PenaltyToggleRequest>, JsonRejection>,
) -> impl IntoResponse {
    toggle_penalty(state, payload, true).await
}

/// Handler for POST /penalties/unapply.
async fn unapply_penalty_handler(
    State(state): State<AppState>,
    payload: Result<Json<PenaltyToggleRequest>, JsonRejection>,
) -> impl IntoResponse {
    toggle_penalty(state, payload, false).await
}

/// Shared penalty toggle flow. Each toggle is one independent idempotent
/// write; a store failure means the toggle did not take effect.
async fn toggle_penalty(
    state: AppState,
    payload: Result<Json<PenaltyToggleRequest>, JsonRejection>,
    is_applied: bool,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(rejection, correlation_id);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let date = match crate::calculation::parse_flexible_date(&request.date) {
        Ok(date) => date,
        Err(err) => return error_response(err, correlation_id),
    };

    info!(
        correlation_id = %correlation_id,
        employee_key = %request.employee_key,
        date = %date,
        is_applied,
        "Toggling break penalty"
    );

    let result = state
        .ledger()
        .set_applied(&request.employee_key, date, request.penalty_hours, is_applied)
        .and_then(|penalty| {
            let applied_hours_total = state.ledger().applied_hours(&request.employee_key)?;
            Ok(PenaltyToggleResponse {
                penalty,
                applied_hours_total,
            })
        });

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err, correlation_id),
    }
}

fn error_response(err: crate::error::PayrollError, correlation_id: Uuid) -> axum::response::Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    api_error.into_response()
}

/// The computed body of a calculation response, before the envelope fields.
struct PayRunOutcome {
    records: Vec<PayRecordResponse>,
    break_assessments: Vec<BreakAssessment>,
    warnings: Vec<ComputationWarning>,
    totals: PayRunTotals,
}

/// Runs one pay-period computation over already-resolved domain data.
///
/// Data flows one direction: timesheet + tips into the break penalty
/// detector, the tip pool allocator (independent of penalties), and finally
/// per-employee gross pay aggregation.
fn perform_calculation(
    pay_period: &PayPeriod,
    profiles: &[EmployeeProfile],
    entries: &[TimesheetEntry],
    daily_tips: &[DailyTipTotal],
    policy: &PayrollPolicy,
    ledger: &PenaltyLedger,
) -> PayrollResult<PayRunOutcome> {
    let mut warnings = Vec::new();

    // Keep only data inside the period window
    let (entries, dropped_entries): (Vec<TimesheetEntry>, Vec<TimesheetEntry>) = entries
        .iter()
        .cloned()
        .partition(|entry| pay_period.contains_date(entry.date));
    if !dropped_entries.is_empty() {
        warnings.push(ComputationWarning::new(
            "OUT_OF_PERIOD",
            format!(
                "{} timesheet entries outside the pay period were ignored",
                dropped_entries.len()
            ),
            "low",
        ));
    }
    let (daily_tips, dropped_tips): (Vec<DailyTipTotal>, Vec<DailyTipTotal>) = daily_tips
        .iter()
        .cloned()
        .partition(|day| pay_period.contains_date(day.date));
    if !dropped_tips.is_empty() {
        warnings.push(ComputationWarning::new(
            "OUT_OF_PERIOD",
            format!(
                "{} daily tip totals outside the pay period were ignored",
                dropped_tips.len()
            ),
            "low",
        ));
    }

    // Break penalties, with applied flags restored from the ledger
    let mut detection = detect_break_penalties(&entries, &policy.break_policy);
    ledger.hydrate(&mut detection.assessments)?;
    warnings.extend(detection.warnings);

    // Tip pool, independent of penalties
    let allocation = allocate_tips(&daily_tips, &entries, profiles, &policy.tip_eligibility)?;
    warnings.extend(allocation.warnings);

    // Applied penalty hours per employee for this period's assessments
    let mut applied_hours: BTreeMap<&str, Decimal> = BTreeMap::new();
    for assessment in detection.assessments.iter().filter(|a| a.is_applied) {
        *applied_hours
            .entry(assessment.employee_key.as_str())
            .or_insert(Decimal::ZERO) += assessment.penalty_hours;
    }

    // Hour buckets per employee
    let mut hours: BTreeMap<&str, (Decimal, Decimal, Decimal)> = BTreeMap::new();
    for entry in &entries {
        let bucket = hours
            .entry(entry.employee_key.as_str())
            .or_insert((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
        bucket.0 += entry.regular_hours;
        bucket.1 += entry.overtime_hours;
        bucket.2 += entry.double_overtime_hours;
    }

    let mut records = Vec::with_capacity(profiles.len());
    let mut totals = PayRunTotals {
        gross_pay: Decimal::ZERO,
        tips_distributed: allocation.distributable_total,
        tips_undistributed: allocation.undistributed_total,
        applied_penalty_hours: Decimal::ZERO,
    };

    for profile in profiles {
        let key = profile.employee_key.as_str();
        let (regular_hours, overtime_hours, double_overtime_hours) =
            hours.get(key).copied().unwrap_or_default();
        let break_penalty_hours = applied_hours.get(key).copied().unwrap_or_default();

        let record = EmployeePayRecord {
            employee_key: profile.employee_key.clone(),
            hourly_rate: profile.hourly_rate,
            regular_hours,
            overtime_hours,
            double_overtime_hours,
            tips: allocation
                .tips_by_employee
                .get(key)
                .copied()
                .unwrap_or_default(),
            break_penalty_hours,
            sick_leave_hours: profile.sick_leave_hours,
        };

        let gross_pay = calculate_gross_pay(&record, &policy.overtime);
        totals.gross_pay += gross_pay.total;
        totals.applied_penalty_hours += break_penalty_hours;

        records.push(PayRecordResponse {
            name: profile.name.clone(),
            job_title: profile.job_title.clone(),
            record,
            gross_pay,
        });
    }

    Ok(PayRunOutcome {
        records,
        break_assessments: detection.assessments,
        warnings,
        totals,
    })
}
