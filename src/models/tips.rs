//! Daily tip total model and upload-boundary parsing.
//!
//! This module defines the DailyTipTotal struct plus the helpers that turn
//! uploaded spreadsheet cells into clean per-day totals.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total cash/card tips collected on one calendar day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DailyTipTotal;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = DailyTipTotal {
///     date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
///     amount: Decimal::new(18450, 2), // $184.50
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTipTotal {
    /// The calendar day the tips were collected.
    pub date: NaiveDate,
    /// The tip amount, two-decimal currency.
    pub amount: Decimal,
}

/// Parses a tip amount cell from an uploaded spreadsheet.
///
/// Strips every character other than digits and the decimal point before
/// conversion, so `"$1,234.56"` parses as `1234.56`. Cells that still fail
/// to parse yield zero, matching the upload boundary's lenient contract.
///
/// # Example
///
/// ```
/// use payroll_engine::models::parse_tip_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_tip_amount("$184.50"), Decimal::new(18450, 2));
/// assert_eq!(parse_tip_amount("n/a"), Decimal::ZERO);
/// ```
pub fn parse_tip_amount(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Merges daily totals from one or more upload sources.
///
/// Amounts for the same day are additive. The result is sorted by date.
pub fn merge_daily_totals(totals: impl IntoIterator<Item = DailyTipTotal>) -> Vec<DailyTipTotal> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for total in totals {
        *by_date.entry(total.date).or_insert(Decimal::ZERO) += total.amount;
    }
    by_date
        .into_iter()
        .map(|(date, amount)| DailyTipTotal { date, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_tip_amount_plain() {
        assert_eq!(parse_tip_amount("184.50"), Decimal::new(18450, 2));
    }

    #[test]
    fn test_parse_tip_amount_currency_symbols() {
        assert_eq!(parse_tip_amount("$1,234.56"), Decimal::new(123456, 2));
        assert_eq!(parse_tip_amount(" $92.07 "), Decimal::new(9207, 2));
    }

    #[test]
    fn test_parse_tip_amount_garbage_is_zero() {
        assert_eq!(parse_tip_amount(""), Decimal::ZERO);
        assert_eq!(parse_tip_amount("n/a"), Decimal::ZERO);
        assert_eq!(parse_tip_amount("--"), Decimal::ZERO);
    }

    #[test]
    fn test_merge_daily_totals_adds_same_day() {
        let merged = merge_daily_totals(vec![
            DailyTipTotal {
                date: date("2025-06-03"),
                amount: Decimal::new(10000, 2),
            },
            DailyTipTotal {
                date: date("2025-06-03"),
                amount: Decimal::new(2550, 2),
            },
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].amount, Decimal::new(12550, 2));
    }

    #[test]
    fn test_merge_daily_totals_sorts_by_date() {
        let merged = merge_daily_totals(vec![
            DailyTipTotal {
                date: date("2025-06-05"),
                amount: Decimal::new(100, 2),
            },
            DailyTipTotal {
                date: date("2025-06-03"),
                amount: Decimal::new(200, 2),
            },
        ]);

        assert_eq!(merged[0].date, date("2025-06-03"));
        assert_eq!(merged[1].date, date("2025-06-05"));
    }

    #[test]
    fn test_daily_tip_total_serialization() {
        let day = DailyTipTotal {
            date: date("2025-06-03"),
            amount: Decimal::new(18450, 2),
        };

        let json = serde_json::to_string(&day).unwrap();
        let deserialized: DailyTipTotal = serde_json::from_str(&json).unwrap();
        assert_eq!(day, deserialized);
    }
}
