//! Employee profile model.
//!
//! This module defines the EmployeeProfile struct describing one worker as
//! consumed from the employee directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee as known to the payroll run.
///
/// The profile carries the identity and rate data produced by the
/// out-of-scope employee directory. `employee_key` is the stable identifier
/// shared with the external payroll provider and is the only key the engine
/// ever joins on.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployeeProfile;
/// use rust_decimal::Decimal;
///
/// let profile = EmployeeProfile {
///     employee_key: "gus_1042".to_string(),
///     name: "Maria Lopez".to_string(),
///     job_title: "Barista".to_string(),
///     hourly_rate: Decimal::new(2050, 2),
///     sick_leave_hours: Decimal::ZERO,
/// };
/// assert_eq!(profile.first_last_name(), ("Maria".to_string(), "Lopez".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Stable identifier shared with the external payroll provider.
    pub employee_key: String,
    /// Display name in "First Last" form.
    pub name: String,
    /// The employee's job title (drives tip eligibility).
    pub job_title: String,
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Operator-entered sick leave hours for the pay period.
    #[serde(default)]
    pub sick_leave_hours: Decimal,
}

impl EmployeeProfile {
    /// Splits the display name into `(first, last)`.
    ///
    /// The first whitespace-separated token is the first name; everything
    /// after it is the last name. A trailing comma on the first token is
    /// trimmed, so both `"Maria Lopez"` and `"Maria, Lopez"` split cleanly.
    /// Single-token names yield an empty last name.
    pub fn first_last_name(&self) -> (String, String) {
        let mut parts = self.name.split_whitespace();
        let first = parts
            .next()
            .unwrap_or("")
            .trim_end_matches(',')
            .to_string();
        let last = parts.collect::<Vec<_>>().join(" ");
        (first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_profile(name: &str) -> EmployeeProfile {
        EmployeeProfile {
            employee_key: "gus_001".to_string(),
            name: name.to_string(),
            job_title: "Barista".to_string(),
            hourly_rate: Decimal::new(2000, 2),
            sick_leave_hours: Decimal::ZERO,
        }
    }

    #[test]
    fn test_first_last_name_simple() {
        let profile = create_profile("Maria Lopez");
        assert_eq!(
            profile.first_last_name(),
            ("Maria".to_string(), "Lopez".to_string())
        );
    }

    #[test]
    fn test_first_last_name_multi_word_last() {
        let profile = create_profile("Ana de la Cruz");
        assert_eq!(
            profile.first_last_name(),
            ("Ana".to_string(), "de la Cruz".to_string())
        );
    }

    #[test]
    fn test_first_last_name_trailing_comma_on_first() {
        let profile = create_profile("Maria, Lopez");
        assert_eq!(
            profile.first_last_name(),
            ("Maria".to_string(), "Lopez".to_string())
        );
    }

    #[test]
    fn test_first_last_name_single_token() {
        let profile = create_profile("Cher");
        assert_eq!(profile.first_last_name(), ("Cher".to_string(), String::new()));
    }

    #[test]
    fn test_deserialize_profile_defaults_sick_hours() {
        let json = r#"{
            "employee_key": "gus_1042",
            "name": "Maria Lopez",
            "job_title": "Shift Lead",
            "hourly_rate": "22.75"
        }"#;

        let profile: EmployeeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.employee_key, "gus_1042");
        assert_eq!(profile.hourly_rate, Decimal::new(2275, 2));
        assert_eq!(profile.sick_leave_hours, Decimal::ZERO);
    }

    #[test]
    fn test_profile_serialization_round_trip() {
        let profile = EmployeeProfile {
            employee_key: "gus_007".to_string(),
            name: "James Bond".to_string(),
            job_title: "Store Manager".to_string(),
            hourly_rate: Decimal::new(3125, 2),
            sick_leave_hours: Decimal::new(40, 1),
        };

        let json = serde_json::to_string(&profile).unwrap();
        let deserialized: EmployeeProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, deserialized);
    }
}
