//! Configuration types for the payroll policy.
//!
//! These types deserialize from `policy.yaml` and carry every tunable
//! constant the calculations use. Defaults match the shipped policy file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Constants governing break penalty detection.
///
/// The shortfall multiplier and half-hour round-up are business policy, not
/// statute; they are configuration rather than hard-coded law.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakPolicy {
    /// Hours worked per block that earns a mandatory break.
    pub block_hours: Decimal,
    /// Break hours owed per complete block worked.
    pub break_per_block_hours: Decimal,
    /// Tolerance absorbed before a shortfall counts (rounding noise).
    pub buffer_hours: Decimal,
    /// Shortfalls round up to the nearest multiple of this increment.
    pub rounding_increment_hours: Decimal,
    /// The rounded shortfall is multiplied by this to produce penalty hours.
    pub shortfall_multiplier: Decimal,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            block_hours: Decimal::new(5, 0),
            break_per_block_hours: Decimal::new(5, 1),
            buffer_hours: Decimal::new(5, 2),
            rounding_increment_hours: Decimal::new(5, 1),
            shortfall_multiplier: Decimal::new(2, 0),
        }
    }
}

/// Pay multipliers for the overtime tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeRates {
    /// Multiplier applied to overtime hours.
    pub overtime_multiplier: Decimal,
    /// Multiplier applied to double-overtime hours.
    pub double_overtime_multiplier: Decimal,
}

impl Default for OvertimeRates {
    fn default() -> Self {
        Self {
            overtime_multiplier: Decimal::new(15, 1),
            double_overtime_multiplier: Decimal::new(2, 0),
        }
    }
}

/// Predicate over job titles deciding tip pool membership.
///
/// All titles are eligible except the excluded list (trainee and new-hire
/// titles by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRule {
    /// Job titles excluded from tip pooling.
    pub excluded_titles: Vec<String>,
}

impl Default for EligibilityRule {
    fn default() -> Self {
        Self {
            excluded_titles: vec!["Trainee".to_string(), "New Employee".to_string()],
        }
    }
}

impl EligibilityRule {
    /// Returns true when the job title participates in the tip pool.
    ///
    /// Comparison ignores surrounding whitespace and ASCII case so directory
    /// typos like "trainee " don't silently re-admit an excluded title.
    pub fn is_eligible(&self, job_title: &str) -> bool {
        let title = job_title.trim();
        !self
            .excluded_titles
            .iter()
            .any(|excluded| excluded.trim().eq_ignore_ascii_case(title))
    }
}

/// The complete payroll policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollPolicy {
    /// Break penalty constants.
    pub break_policy: BreakPolicy,
    /// Overtime tier multipliers.
    pub overtime: OvertimeRates,
    /// Tip pool eligibility rule.
    pub tip_eligibility: EligibilityRule,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_break_policy_defaults() {
        let policy = BreakPolicy::default();
        assert_eq!(policy.block_hours, dec("5"));
        assert_eq!(policy.break_per_block_hours, dec("0.5"));
        assert_eq!(policy.buffer_hours, dec("0.05"));
        assert_eq!(policy.rounding_increment_hours, dec("0.5"));
        assert_eq!(policy.shortfall_multiplier, dec("2"));
    }

    #[test]
    fn test_overtime_defaults() {
        let rates = OvertimeRates::default();
        assert_eq!(rates.overtime_multiplier, dec("1.5"));
        assert_eq!(rates.double_overtime_multiplier, dec("2"));
    }

    #[test]
    fn test_default_eligibility_excludes_trainees() {
        let rule = EligibilityRule::default();
        assert!(rule.is_eligible("Barista"));
        assert!(rule.is_eligible("Store Manager"));
        assert!(!rule.is_eligible("Trainee"));
        assert!(!rule.is_eligible("New Employee"));
    }

    #[test]
    fn test_eligibility_ignores_case_and_whitespace() {
        let rule = EligibilityRule::default();
        assert!(!rule.is_eligible(" trainee "));
        assert!(!rule.is_eligible("NEW EMPLOYEE"));
    }

    #[test]
    fn test_policy_deserializes_from_partial_yaml() {
        let yaml = r#"
break_policy:
  shortfall_multiplier: "1"
tip_eligibility:
  excluded_titles:
    - Apprentice
"#;
        let policy: PayrollPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.break_policy.shortfall_multiplier, dec("1"));
        // Unspecified fields fall back to defaults.
        assert_eq!(policy.break_policy.block_hours, dec("5"));
        assert_eq!(policy.overtime.overtime_multiplier, dec("1.5"));
        assert!(!policy.tip_eligibility.is_eligible("Apprentice"));
        assert!(policy.tip_eligibility.is_eligible("Trainee"));
    }

    #[test]
    fn test_policy_round_trip() {
        let policy = PayrollPolicy::default();
        let yaml = serde_yaml::to_string(&policy).unwrap();
        let parsed: PayrollPolicy = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(policy, parsed);
    }
}
