//! Tip pool distribution.
//!
//! This module distributes each day's tip total across eligible employees
//! proportionally to hours worked, then reconciles pennies once across the
//! whole pay period so the allocated total matches the distributable total
//! exactly to the cent.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use crate::config::EligibilityRule;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    ComputationWarning, DailyTipTotal, EmployeeProfile, TimesheetEntry, merge_daily_totals,
};

/// The outcome of tip allocation for one pay period.
#[derive(Debug, Clone)]
pub struct TipAllocation {
    /// Final tip amount per employee key. Every profile has an entry;
    /// employees with no distributed tips receive zero.
    pub tips_by_employee: BTreeMap<String, Decimal>,
    /// The sum of daily amounts that were actually distributed.
    pub distributable_total: Decimal,
    /// The sum of daily amounts skipped for lack of eligible workers.
    pub undistributed_total: Decimal,
    /// Reportable conditions (skipped days, unknown employee keys).
    pub warnings: Vec<ComputationWarning>,
}

/// Distributes daily tip totals across eligible employees.
///
/// Per day with a positive amount, each eligible employee who worked that
/// day accrues `(employee hours / total eligible hours) * daily amount`.
/// Days where no eligible employee worked are skipped with a warning and
/// their amounts stay undistributed.
///
/// Penny reconciliation runs once over the accumulated period totals: each
/// employee's raw total is floored to cents, then the leftover cents are
/// handed out one at a time in the order employees first earned a share, so
/// the final sum equals the distributable total exactly.
///
/// # Errors
///
/// Returns [`PayrollError::ReconciliationMismatch`] if the reconciled total
/// does not equal the distributable total. That invariant breaking means an
/// allocator bug and is never swallowed.
pub fn allocate_tips(
    daily_totals: &[DailyTipTotal],
    entries: &[TimesheetEntry],
    profiles: &[EmployeeProfile],
    rule: &EligibilityRule,
) -> PayrollResult<TipAllocation> {
    let profile_by_key: BTreeMap<&str, &EmployeeProfile> = profiles
        .iter()
        .map(|profile| (profile.employee_key.as_str(), profile))
        .collect();

    let mut entries_by_date: BTreeMap<NaiveDate, Vec<&TimesheetEntry>> = BTreeMap::new();
    for entry in entries {
        entries_by_date.entry(entry.date).or_default().push(entry);
    }

    let mut warnings = Vec::new();
    let mut unknown_keys: BTreeSet<String> = BTreeSet::new();

    // Raw per-employee accumulation across all days, plus the stable order
    // in which employees first earned a share (drives cent distribution).
    let mut raw_totals: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    let mut distributable_total = Decimal::ZERO;
    let mut undistributed_total = Decimal::ZERO;

    for day in merge_daily_totals(daily_totals.to_vec()) {
        if day.amount <= Decimal::ZERO {
            continue;
        }

        let mut eligible: Vec<(&str, Decimal)> = Vec::new();
        for entry in entries_by_date.get(&day.date).into_iter().flatten() {
            match profile_by_key.get(entry.employee_key.as_str()) {
                Some(profile) if rule.is_eligible(&profile.job_title) => {
                    // A zero-hour segment is not "worked that day".
                    if entry.worked_hours() > Decimal::ZERO {
                        eligible.push((profile.employee_key.as_str(), entry.worked_hours()));
                    }
                }
                Some(_) => {}
                None => {
                    unknown_keys.insert(entry.employee_key.clone());
                }
            }
        }

        let total_hours: Decimal = eligible.iter().map(|(_, hours)| *hours).sum();
        if eligible.is_empty() || total_hours <= Decimal::ZERO {
            warn!(date = %day.date, amount = %day.amount, "No eligible hours worked; tips not distributed");
            warnings.push(ComputationWarning::new(
                "NO_ELIGIBLE_WORKERS",
                format!(
                    "No eligible employee worked on {}; ${} left undistributed",
                    day.date, day.amount
                ),
                "medium",
            ));
            undistributed_total += day.amount;
            continue;
        }

        for (key, hours) in eligible {
            let share = hours / total_hours * day.amount;
            let total = raw_totals.entry(key.to_string()).or_insert_with(|| {
                first_seen.push(key.to_string());
                Decimal::ZERO
            });
            *total += share;
        }
        distributable_total += day.amount;
    }

    if !unknown_keys.is_empty() {
        let keys: Vec<&str> = unknown_keys.iter().map(String::as_str).collect();
        warnings.push(ComputationWarning::new(
            "UNKNOWN_EMPLOYEE",
            format!(
                "Timesheet entries for unknown employee keys excluded from tip pool: {}",
                keys.join(", ")
            ),
            "low",
        ));
    }

    // Penny reconciliation in integer cents: floor every share, then top up
    // one cent at a time in first-seen order until the total matches.
    let cents = Decimal::new(100, 0);
    let target_cents = (distributable_total * cents)
        .round()
        .to_i64()
        .unwrap_or_default();

    let mut cents_by_key: BTreeMap<&str, i64> = BTreeMap::new();
    for key in &first_seen {
        let raw = raw_totals[key];
        if raw > Decimal::ZERO {
            let floored = (raw * cents).floor().to_i64().unwrap_or_default();
            cents_by_key.insert(key.as_str(), floored);
        }
    }

    let allocated_cents: i64 = cents_by_key.values().sum();
    let cents_remaining = target_cents - allocated_cents;
    for (index, key) in first_seen.iter().enumerate() {
        if (index as i64) < cents_remaining {
            *cents_by_key.entry(key.as_str()).or_insert(0) += 1;
        }
    }

    let mut tips_by_employee: BTreeMap<String, Decimal> = profiles
        .iter()
        .map(|profile| (profile.employee_key.clone(), Decimal::ZERO))
        .collect();
    for (key, value) in &cents_by_key {
        tips_by_employee.insert((*key).to_string(), Decimal::new(*value, 2));
    }

    let allocated: Decimal = tips_by_employee.values().copied().sum();
    if allocated != distributable_total {
        return Err(PayrollError::ReconciliationMismatch {
            expected: distributable_total,
            allocated,
        });
    }

    Ok(TipAllocation {
        tips_by_employee,
        distributable_total,
        undistributed_total,
        warnings,
    })
}
