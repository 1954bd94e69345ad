//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollPolicy;

/// Loads and provides access to the payroll policy.
///
/// # Directory Structure
///
/// The configuration directory holds a single file:
/// ```text
/// config/
/// └── policy.yaml   # Break policy, overtime multipliers, eligibility
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// assert!(!loader.policy().tip_eligibility.is_eligible("Trainee"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: PayrollPolicy,
}

impl ConfigLoader {
    /// Loads the policy from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`PayrollError::ConfigNotFound`] when `policy.yaml` is missing
    /// - [`PayrollError::ConfigParseError`] when the YAML is invalid
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let policy_path = path.as_ref().join("policy.yaml");
        let path_str = policy_path.display().to_string();

        let content = fs::read_to_string(&policy_path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let policy = serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })?;

        Ok(Self { policy })
    }

    /// Wraps an already-built policy, for embedding and tests.
    pub fn from_policy(policy: PayrollPolicy) -> Self {
        Self { policy }
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_policy(PayrollPolicy::default())
    }
}
