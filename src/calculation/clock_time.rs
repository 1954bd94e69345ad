//! Clock-time parsing and span calculation.
//!
//! This module parses the wall-clock time-of-day strings that arrive on
//! timesheet rows and computes shift spans, handling shifts that cross
//! midnight.

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};

/// Parses a clock-time string into a time within a reference day.
///
/// Accepts `"H:MM AM/PM"` (with or without the space, any case) and 24-hour
/// `"H:MM"` forms.
///
/// # Errors
///
/// Returns [`PayrollError::MalformedTime`] on unparseable input; callers
/// decide whether to skip the affected group or abort the batch.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_clock_time("9:29AM").unwrap(),
///     NaiveTime::from_hms_opt(9, 29, 0).unwrap()
/// );
/// assert_eq!(
///     parse_clock_time("6:20 pm").unwrap(),
///     NaiveTime::from_hms_opt(18, 20, 0).unwrap()
/// );
/// assert_eq!(
///     parse_clock_time("14:30").unwrap(),
///     NaiveTime::from_hms_opt(14, 30, 0).unwrap()
/// );
/// ```
pub fn parse_clock_time(text: &str) -> PayrollResult<NaiveTime> {
    let malformed = || PayrollError::MalformedTime {
        text: text.to_string(),
    };

    let upper = text.trim().to_ascii_uppercase();
    let (body, meridiem) = if let Some(stripped) = upper.strip_suffix("AM") {
        (stripped.trim_end(), Some(false))
    } else if let Some(stripped) = upper.strip_suffix("PM") {
        (stripped.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let (hour_text, minute_text) = body.split_once(':').ok_or_else(malformed)?;
    let hour: u32 = hour_text.trim().parse().map_err(|_| malformed())?;
    let minute: u32 = minute_text.trim().parse().map_err(|_| malformed())?;

    let hour = match meridiem {
        Some(is_pm) => {
            if hour == 0 || hour > 12 {
                return Err(malformed());
            }
            match (is_pm, hour) {
                (false, 12) => 0,
                (false, h) => h,
                (true, 12) => 12,
                (true, h) => h + 12,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)
}

/// The minute-of-day for a clock-out, resolved against its own clock-in.
///
/// A clock-out that is wall-clock-earlier than its clock-in belongs to the
/// next day and is shifted by 24 hours.
pub(crate) fn resolved_clock_out_minute(clock_in: NaiveTime, clock_out: NaiveTime) -> i64 {
    let out = minute_of_day(clock_out);
    if clock_out < clock_in {
        out + 24 * 60
    } else {
        out
    }
}

/// Minutes elapsed since midnight for a time of day.
pub(crate) fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) / 60
}

/// The span between a clock-in and a clock-out, in hours.
///
/// If `clock_out` is earlier than `clock_in` by wall-clock comparison the
/// shift crossed midnight and 24 hours are added before differencing.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{parse_clock_time, span_hours};
/// use rust_decimal::Decimal;
///
/// let clock_in = parse_clock_time("11:00PM").unwrap();
/// let clock_out = parse_clock_time("3:00AM").unwrap();
/// assert_eq!(span_hours(clock_in, clock_out), Decimal::new(40, 1)); // 4.0
/// ```
pub fn span_hours(clock_in: NaiveTime, clock_out: NaiveTime) -> Decimal {
    let minutes = resolved_clock_out_minute(clock_in, clock_out) - minute_of_day(clock_in);
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Parses a calendar-date string in either `YYYY-MM-DD` or `M/D/YYYY` form.
///
/// # Errors
///
/// Returns [`PayrollError::MalformedDate`] when neither form matches.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_flexible_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
/// assert_eq!(parse_flexible_date("2025-06-03").unwrap(), expected);
/// assert_eq!(parse_flexible_date("6/3/2025").unwrap(), expected);
/// ```
pub fn parse_flexible_date(text: &str) -> PayrollResult<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .map_err(|_| PayrollError::MalformedDate {
            text: text.to_string(),
        })
}
