//! Persistence for break penalty state.
//!
//! This module provides the injected key-value store abstraction behind the
//! penalty ledger, with an in-memory implementation for tests and ephemeral
//! runs and a JSON-file implementation for durable single-operator use.

mod ledger;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{PayrollError, PayrollResult};

pub use ledger::PenaltyLedger;

/// A durable keyed store for small JSON-encoded records.
///
/// Implementations must support read-modify-write by key; writes for
/// different keys must not interfere, and a write for the same key is
/// last-write-wins (single-operator usage, no conflict resolution).
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> PayrollResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> PayrollResult<()>;

    /// Returns all `(key, value)` pairs whose key starts with `prefix`.
    ///
    /// Needed to sum one employee's records without tracking keys
    /// externally.
    fn scan_prefix(&self, prefix: &str) -> PayrollResult<Vec<(String, String)>>;
}

/// An in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PayrollResult<Option<String>> {
        let entries = self.entries.lock().map_err(|e| PayrollError::PersistenceRead {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> PayrollResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PayrollError::PersistenceWrite {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> PayrollResult<Vec<(String, String)>> {
        let entries = self.entries.lock().map_err(|e| PayrollError::PersistenceRead {
            key: prefix.to_string(),
            message: e.to_string(),
        })?;
        Ok(entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

/// A store backed by a single JSON map file.
///
/// Every put rewrites the whole file under a lock. Fine for the
/// single-operator, once-per-pay-period usage this engine serves.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store over the given file path. The file is created on the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_map(&self, key: &str) -> PayrollResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| PayrollError::PersistenceRead {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(PayrollError::PersistenceRead {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }

    fn write_map(&self, key: &str, map: &BTreeMap<String, String>) -> PayrollResult<()> {
        let content = serde_json::to_string(map).map_err(|e| PayrollError::PersistenceWrite {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        fs::write(&self.path, content).map_err(|e| PayrollError::PersistenceWrite {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> PayrollResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|e| PayrollError::PersistenceRead {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.read_map(key)?.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> PayrollResult<()> {
        let _guard = self.lock.lock().map_err(|e| PayrollError::PersistenceWrite {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        let mut map = self.read_map(key)?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(key, &map)
    }

    fn scan_prefix(&self, prefix: &str) -> PayrollResult<Vec<(String, String)>> {
        let _guard = self.lock.lock().map_err(|e| PayrollError::PersistenceRead {
            key: prefix.to_string(),
            message: e.to_string(),
        })?;
        Ok(self
            .read_map(prefix)?
            .into_iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .collect())
    }
}
