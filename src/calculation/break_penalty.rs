//! Break penalty detection.
//!
//! This module analyzes raw clock-in/clock-out events per employee per day
//! to determine whether the legally required break was taken, and computes a
//! penalty-hour amount when it was not.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::BreakPolicy;
use crate::models::{BreakAssessment, ComputationWarning, TimesheetEntry, group_by_employee_day};

use super::clock_time::{minute_of_day, parse_clock_time, resolved_clock_out_minute};

/// The outcome of break analysis over one pay period's timesheet.
#[derive(Debug, Clone)]
pub struct BreakDetection {
    /// One assessment per employee-day with a shortfall, `is_applied` false
    /// until hydrated from the penalty ledger.
    pub assessments: Vec<BreakAssessment>,
    /// Groups skipped for missing or unparseable clock data.
    pub warnings: Vec<ComputationWarning>,
}

/// Break hours legally required for a day's worked hours.
///
/// 30 minutes are mandatory per each complete block worked (five hours per
/// block under the default policy).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::required_break_hours;
/// use payroll_engine::config::BreakPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = BreakPolicy::default();
/// assert_eq!(
///     required_break_hours(Decimal::new(100, 1), &policy),
///     Decimal::new(10, 1) // 10h worked -> 1.0h break
/// );
/// assert_eq!(
///     required_break_hours(Decimal::new(49, 1), &policy),
///     Decimal::ZERO // 4.9h worked -> no break due
/// );
/// ```
pub fn required_break_hours(worked_hours: Decimal, policy: &BreakPolicy) -> Decimal {
    (worked_hours / policy.block_hours).floor() * policy.break_per_block_hours
}

/// Rounds a value up to the nearest multiple of `increment`.
pub fn round_up_to_increment(value: Decimal, increment: Decimal) -> Decimal {
    (value / increment).ceil() * increment
}

/// Analyzes the timesheet and emits a penalty assessment for every
/// employee-day whose break fell short of the requirement.
///
/// Per `(employee_key, date)` group:
/// 1. The earliest clock-in is the day start; the chronologically last
///    clock-out (each resolved against its own clock-in for midnight
///    wraparound) is the day end.
/// 2. `break_taken` is the more generous of the reported break total and the
///    day span minus worked hours, because either measurement may
///    under-report.
/// 3. A shortfall beyond the policy buffer produces penalty hours: the
///    shortfall rounded up to the policy increment, times the policy
///    multiplier.
///
/// Groups with a missing or unparseable clock time are skipped with a
/// warning; partial data never blocks penalty computation for other
/// employees.
pub fn detect_break_penalties(entries: &[TimesheetEntry], policy: &BreakPolicy) -> BreakDetection {
    let mut assessments = Vec::new();
    let mut warnings = Vec::new();

    for ((employee_key, date), group) in group_by_employee_day(entries) {
        if group
            .iter()
            .any(|entry| entry.clock_out.trim().is_empty())
        {
            warn!(employee_key = %employee_key, date = %date, "Skipping group with no clock-out");
            warnings.push(ComputationWarning::new(
                "MISSING_CLOCK_OUT",
                format!(
                    "Skipped break analysis for {} on {}: no clock-out recorded",
                    employee_key, date
                ),
                "medium",
            ));
            continue;
        }

        let mut parsed = Vec::with_capacity(group.len());
        let mut parse_failure = None;
        for entry in &group {
            match (
                parse_clock_time(&entry.clock_in),
                parse_clock_time(&entry.clock_out),
            ) {
                (Ok(clock_in), Ok(clock_out)) => parsed.push((*entry, clock_in, clock_out)),
                (Err(err), _) | (_, Err(err)) => {
                    parse_failure = Some(err);
                    break;
                }
            }
        }
        if let Some(err) = parse_failure {
            warn!(employee_key = %employee_key, date = %date, error = %err, "Skipping group with malformed clock time");
            warnings.push(ComputationWarning::new(
                "MALFORMED_TIME",
                format!(
                    "Skipped break analysis for {} on {}: {}",
                    employee_key, date, err
                ),
                "medium",
            ));
            continue;
        }

        // Earliest clock-in opens the day; the last clock-out (overnight
        // resolved per entry) closes it.
        let first = parsed
            .iter()
            .min_by_key(|(_, clock_in, _)| minute_of_day(*clock_in))
            .map(|(entry, clock_in, _)| (entry.clock_in.clone(), minute_of_day(*clock_in)));
        let last = parsed
            .iter()
            .max_by_key(|(_, clock_in, clock_out)| resolved_clock_out_minute(*clock_in, *clock_out))
            .map(|(entry, clock_in, clock_out)| {
                (
                    entry.clock_out.clone(),
                    resolved_clock_out_minute(*clock_in, *clock_out),
                )
            });
        let (Some((clock_in_text, day_start)), Some((clock_out_text, day_end))) = (first, last)
        else {
            continue;
        };

        let worked_hours: Decimal = parsed.iter().map(|(entry, _, _)| entry.worked_hours()).sum();
        let reported_break: Decimal = parsed.iter().map(|(entry, _, _)| entry.break_hours()).sum();

        let span_hours = Decimal::new(day_end - day_start, 0) / Decimal::new(60, 0);
        let break_by_difference = span_hours - worked_hours;
        let break_taken = reported_break.max(break_by_difference);
        let break_required = required_break_hours(worked_hours, policy);

        if break_required > break_taken + policy.buffer_hours {
            let shortfall = break_required - break_taken;
            let penalty_hours = round_up_to_increment(shortfall, policy.rounding_increment_hours)
                * policy.shortfall_multiplier;

            assessments.push(BreakAssessment {
                employee_key,
                date,
                clock_in: clock_in_text,
                clock_out: clock_out_text,
                worked_hours,
                break_required,
                break_taken,
                penalty_hours,
                is_applied: false,
            });
        }
    }

    BreakDetection {
        assessments,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_entry(
        key: &str,
        day: &str,
        clock_in: &str,
        clock_out: &str,
        worked: &str,
        break_reported: &str,
    ) -> TimesheetEntry {
        TimesheetEntry {
            employee_key: key.to_string(),
            date: date(day),
            clock_in: clock_in.to_string(),
            clock_out: clock_out.to_string(),
            break_reported: dec(break_reported),
            regular_hours: dec(worked),
            overtime_hours: Decimal::ZERO,
            double_overtime_hours: Decimal::ZERO,
        }
    }

    #[test]
    fn test_required_break_scales_by_block() {
        let policy = BreakPolicy::default();
        assert_eq!(required_break_hours(dec("4.9"), &policy), Decimal::ZERO);
        assert_eq!(required_break_hours(dec("5.0"), &policy), dec("0.5"));
        assert_eq!(required_break_hours(dec("9.9"), &policy), dec("0.5"));
        assert_eq!(required_break_hours(dec("10.0"), &policy), dec("1.0"));
        assert_eq!(required_break_hours(dec("15.0"), &policy), dec("1.5"));
    }

    #[test]
    fn test_round_up_to_increment() {
        assert_eq!(round_up_to_increment(dec("0.1"), dec("0.5")), dec("0.5"));
        assert_eq!(round_up_to_increment(dec("0.5"), dec("0.5")), dec("0.5"));
        assert_eq!(round_up_to_increment(dec("0.51"), dec("0.5")), dec("1.0"));
    }

    /// Break shortfall within the buffer produces no penalty.
    #[test]
    fn test_shortfall_within_buffer_is_forgiven() {
        // 10h worked over a 10.97h span: break by difference is 0.97h
        // against a 1.0h requirement, inside the 0.05h buffer.
        let entries = vec![make_entry(
            "gus_001",
            "2025-06-03",
            "8:00AM",
            "6:58PM",
            "10.0",
            "0",
        )];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert!(detection.assessments.is_empty());
        assert!(detection.warnings.is_empty());
    }

    /// A 0.1h shortfall rounds up to 0.5 and doubles to 1.0 penalty hours.
    #[test]
    fn test_shortfall_beyond_buffer_penalized() {
        // 10h worked over a 10.9h span: break taken 0.9h, required 1.0h.
        let entries = vec![make_entry(
            "gus_001",
            "2025-06-03",
            "8:00AM",
            "6:54PM",
            "10.0",
            "0",
        )];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert_eq!(detection.assessments.len(), 1);

        let assessment = &detection.assessments[0];
        assert_eq!(assessment.break_required, dec("1.0"));
        assert_eq!(assessment.break_taken, dec("0.9"));
        assert_eq!(assessment.penalty_hours, dec("1.0"));
        assert!(!assessment.is_applied);
    }

    #[test]
    fn test_reported_break_prevents_penalty() {
        // Span equals worked hours, but a 60-minute reported break covers
        // the 0.5h requirement for 8h worked.
        let entries = vec![make_entry(
            "gus_001",
            "2025-06-03",
            "9:00AM",
            "5:00PM",
            "8.0",
            "60",
        )];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert!(detection.assessments.is_empty());
    }

    #[test]
    fn test_more_generous_estimate_wins() {
        // Reported break is 15 minutes but the span leaves a 1.0h gap; the
        // gap estimate is used and covers the requirement.
        let entries = vec![make_entry(
            "gus_001",
            "2025-06-03",
            "9:00AM",
            "6:00PM",
            "8.0",
            "15",
        )];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert!(detection.assessments.is_empty());
    }

    #[test]
    fn test_split_shifts_grouped_before_analysis() {
        // Two segments 9-1 and 2-6: the hour between them counts as break
        // by difference, covering the 0.5h requirement for 8h worked.
        let entries = vec![
            make_entry("gus_001", "2025-06-03", "9:00AM", "1:00PM", "4.0", "0"),
            make_entry("gus_001", "2025-06-03", "2:00PM", "6:00PM", "4.0", "0"),
        ];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert!(detection.assessments.is_empty());
    }

    #[test]
    fn test_split_shifts_without_gap_penalized() {
        // Back-to-back segments totalling 10h with no gap and no reported
        // break: a full 1.0h shortfall doubles to 2.0 penalty hours.
        let entries = vec![
            make_entry("gus_001", "2025-06-03", "8:00AM", "1:00PM", "5.0", "0"),
            make_entry("gus_001", "2025-06-03", "1:00PM", "6:00PM", "5.0", "0"),
        ];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert_eq!(detection.assessments.len(), 1);
        assert_eq!(detection.assessments[0].penalty_hours, dec("2.0"));
    }

    #[test]
    fn test_overnight_group_resolves_wraparound() {
        // 8:00PM to 6:30AM is a 10.5h span; 10h worked leaves 0.5h break
        // against a 1.0h requirement: shortfall 0.5, doubled to 1.0.
        let entries = vec![make_entry(
            "gus_001",
            "2025-06-03",
            "8:00PM",
            "6:30AM",
            "10.0",
            "0",
        )];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert_eq!(detection.assessments.len(), 1);
        assert_eq!(detection.assessments[0].penalty_hours, dec("1.0"));
        assert_eq!(detection.assessments[0].clock_out, "6:30AM");
    }

    #[test]
    fn test_missing_clock_out_skips_group_with_warning() {
        let entries = vec![
            make_entry("gus_001", "2025-06-03", "8:00AM", "", "10.0", "0"),
            make_entry("gus_002", "2025-06-03", "8:00AM", "6:54PM", "10.0", "0"),
        ];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert_eq!(detection.warnings.len(), 1);
        assert_eq!(detection.warnings[0].code, "MISSING_CLOCK_OUT");
        // The other employee's penalty still computes.
        assert_eq!(detection.assessments.len(), 1);
        assert_eq!(detection.assessments[0].employee_key, "gus_002");
    }

    #[test]
    fn test_malformed_time_skips_group_with_warning() {
        let entries = vec![make_entry(
            "gus_001",
            "2025-06-03",
            "zz:zzAM",
            "6:00PM",
            "10.0",
            "0",
        )];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert!(detection.assessments.is_empty());
        assert_eq!(detection.warnings.len(), 1);
        assert_eq!(detection.warnings[0].code, "MALFORMED_TIME");
    }

    #[test]
    fn test_short_day_requires_no_break() {
        let entries = vec![make_entry(
            "gus_001",
            "2025-06-03",
            "9:00AM",
            "1:30PM",
            "4.5",
            "0",
        )];

        let detection = detect_break_penalties(&entries, &BreakPolicy::default());
        assert!(detection.assessments.is_empty());
    }

    #[test]
    fn test_policy_multiplier_is_configurable() {
        let policy = BreakPolicy {
            shortfall_multiplier: Decimal::ONE,
            ..BreakPolicy::default()
        };
        let entries = vec![make_entry(
            "gus_001",
            "2025-06-03",
            "8:00AM",
            "6:54PM",
            "10.0",
            "0",
        )];

        let detection = detect_break_penalties(&entries, &policy);
        assert_eq!(detection.assessments[0].penalty_hours, dec("0.5"));
    }
}
