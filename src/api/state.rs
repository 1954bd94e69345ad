//! Application state for the Payroll Computation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::PenaltyLedger;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded payroll policy and the break penalty ledger.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll policy.
    config: Arc<ConfigLoader>,
    /// The persisted break penalty ledger.
    ledger: Arc<PenaltyLedger>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader
    /// and penalty ledger.
    pub fn new(config: ConfigLoader, ledger: PenaltyLedger) -> Self {
        Self {
            config: Arc::new(config),
            ledger: Arc::new(ledger),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the penalty ledger.
    pub fn ledger(&self) -> &PenaltyLedger {
        &self.ledger
    }
}
