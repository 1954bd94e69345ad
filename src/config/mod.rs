//! Configuration loading and management for the Payroll Computation Engine.
//!
//! This module provides functionality to load the payroll policy from a YAML
//! file: break penalty constants, overtime multipliers, and tip eligibility.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! assert!(config.policy().tip_eligibility.is_eligible("Barista"));
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BreakPolicy, EligibilityRule, OvertimeRates, PayrollPolicy};
