//! The break penalty ledger.
//!
//! The ledger is the single source of truth for applied/unapplied penalty
//! state, keyed by `(employee_key, date)` over an injected [`KeyValueStore`]
//! so recomputing the timesheet never loses an operator's decisions.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{BreakAssessment, BreakPenalty, penalty_key};

use super::KeyValueStore;

/// Read-modify-write access to persisted break penalty records.
pub struct PenaltyLedger {
    store: Box<dyn KeyValueStore>,
}

impl PenaltyLedger {
    /// Creates a ledger over the given store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Reads the persisted record for one employee-day, if any.
    pub fn get(&self, employee_key: &str, date: NaiveDate) -> PayrollResult<Option<BreakPenalty>> {
        let key = penalty_key(employee_key, date);
        match self.store.get(&key)? {
            Some(raw) => {
                let penalty =
                    serde_json::from_str(&raw).map_err(|e| PayrollError::PersistenceRead {
                        key,
                        message: e.to_string(),
                    })?;
                Ok(Some(penalty))
            }
            None => Ok(None),
        }
    }

    fn save(&self, penalty: &BreakPenalty) -> PayrollResult<()> {
        let key = penalty.storage_key();
        let raw = serde_json::to_string(penalty).map_err(|e| PayrollError::PersistenceWrite {
            key: key.clone(),
            message: e.to_string(),
        })?;
        self.store.put(&key, &raw)
    }

    /// Copies persisted applied flags onto freshly detected assessments.
    ///
    /// Assessments with no persisted record keep `is_applied == false`.
    pub fn hydrate(&self, assessments: &mut [BreakAssessment]) -> PayrollResult<()> {
        for assessment in assessments {
            if let Some(stored) = self.get(&assessment.employee_key, assessment.date)? {
                assessment.is_applied = stored.is_applied;
            }
        }
        Ok(())
    }

    /// Sets the applied flag for one employee-day, creating the record if
    /// absent. Idempotent: repeating a toggle leaves the same state.
    pub fn set_applied(
        &self,
        employee_key: &str,
        date: NaiveDate,
        penalty_hours: Decimal,
        is_applied: bool,
    ) -> PayrollResult<BreakPenalty> {
        let penalty = BreakPenalty {
            employee_key: employee_key.to_string(),
            date,
            penalty_hours,
            is_applied,
        };
        self.save(&penalty)?;
        Ok(penalty)
    }

    /// Marks a penalty applied.
    pub fn apply(
        &self,
        employee_key: &str,
        date: NaiveDate,
        penalty_hours: Decimal,
    ) -> PayrollResult<BreakPenalty> {
        self.set_applied(employee_key, date, penalty_hours, true)
    }

    /// Marks a penalty unapplied.
    pub fn unapply(
        &self,
        employee_key: &str,
        date: NaiveDate,
        penalty_hours: Decimal,
    ) -> PayrollResult<BreakPenalty> {
        self.set_applied(employee_key, date, penalty_hours, false)
    }

    /// All persisted records for one employee, in date order.
    pub fn records_for(&self, employee_key: &str) -> PayrollResult<Vec<BreakPenalty>> {
        let prefix = format!("{}_", employee_key);
        let mut records = Vec::new();
        for (key, raw) in self.store.scan_prefix(&prefix)? {
            let penalty: BreakPenalty =
                serde_json::from_str(&raw).map_err(|e| PayrollError::PersistenceRead {
                    key,
                    message: e.to_string(),
                })?;
            records.push(penalty);
        }
        records.sort_by_key(|p| p.date);
        Ok(records)
    }

    /// Total applied penalty hours for one employee across all dates.
    pub fn applied_hours(&self, employee_key: &str) -> PayrollResult<Decimal> {
        Ok(self
            .records_for(employee_key)?
            .iter()
            .filter(|p| p.is_applied)
            .map(|p| p.penalty_hours)
            .sum())
    }
}
