//! Durable key-value storage for focus mode state.
//!
//! The engine talks to storage only through [`KvStore`]: scalar values
//! addressed by string keys, plus enumeration by key prefix. [`RedbStore`]
//! is the on-disk implementation; [`MemoryStore`] backs tests.
//!
//! # Table design
//!
//! A single `VALUES` table maps the raw key string to a JSON-encoded
//! [`StoreValue`]. Keys sort lexicographically, so a prefix scan is a
//! range scan from the prefix forward, stopping at the first key that no
//! longer matches.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::error::{FocusError, Result};

// ---------------------------------------------------------------------------
// StoreValue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoreValue {
    Bool(bool),
    String(String),
    Timestamp(DateTime<Utc>),
}

/// One write in a batch passed to [`KvStore::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    Set(String, StoreValue),
    Delete(String),
}

impl StoreOp {
    pub fn set(key: impl Into<String>, value: StoreValue) -> Self {
        Self::Set(key.into(), value)
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete(key.into())
    }
}

// ---------------------------------------------------------------------------
// KvStore
// ---------------------------------------------------------------------------

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<StoreValue>>;

    /// Insert or replace the value at `key`.
    fn set(&self, key: &str, value: StoreValue) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Apply every op or none of them.
    fn apply(&self, ops: &[StoreOp]) -> Result<()>;

    /// All keys starting with `prefix`, in lexicographic order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Read a boolean; a missing key or a value of another type reads as `None`.
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(match self.get(key)? {
            Some(StoreValue::Bool(b)) => Some(b),
            _ => None,
        })
    }

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(match self.get(key)? {
            Some(StoreValue::String(s)) => Some(s),
            _ => None,
        })
    }

    fn get_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(match self.get(key)? {
            Some(StoreValue::Timestamp(t)) => Some(t),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// RedbStore
// ---------------------------------------------------------------------------

/// Key: UTF-8 key string
/// Value: JSON-encoded StoreValue
const VALUES: TableDefinition<&str, &[u8]> = TableDefinition::new("values");

fn db_err(e: impl std::fmt::Display) -> FocusError {
    FocusError::Store(e.to_string())
}

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create the redb database at `path`.
    ///
    /// Creates the parent directory and the `VALUES` table if missing.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            crate::io::ensure_dir(parent)?;
        }
        let db = Database::create(path).map_err(db_err)?;
        // Ensure the table exists before any reads
        let wt = db.begin_write().map_err(db_err)?;
        wt.open_table(VALUES).map_err(db_err)?;
        wt.commit().map_err(db_err)?;
        tracing::debug!(path = %path.display(), "opened focus state store");
        Ok(Self { db })
    }
}

impl KvStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<StoreValue>> {
        let rt = self.db.begin_read().map_err(db_err)?;
        let table = rt.open_table(VALUES).map_err(db_err)?;
        match table.get(key).map_err(db_err)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: StoreValue) -> Result<()> {
        let encoded = serde_json::to_vec(&value)?;
        let wt = self.db.begin_write().map_err(db_err)?;
        {
            let mut table = wt.open_table(VALUES).map_err(db_err)?;
            table.insert(key, encoded.as_slice()).map_err(db_err)?;
        }
        wt.commit().map_err(db_err)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let wt = self.db.begin_write().map_err(db_err)?;
        {
            let mut table = wt.open_table(VALUES).map_err(db_err)?;
            table.remove(key).map_err(db_err)?;
        }
        wt.commit().map_err(db_err)?;
        Ok(())
    }

    fn apply(&self, ops: &[StoreOp]) -> Result<()> {
        // Encode up front so a bad value aborts before the transaction opens
        let mut encoded: Vec<(&str, Option<Vec<u8>>)> = Vec::with_capacity(ops.len());
        for op in ops {
            match op {
                StoreOp::Set(key, value) => {
                    encoded.push((key.as_str(), Some(serde_json::to_vec(value)?)))
                }
                StoreOp::Delete(key) => encoded.push((key.as_str(), None)),
            }
        }

        let wt = self.db.begin_write().map_err(db_err)?;
        {
            let mut table = wt.open_table(VALUES).map_err(db_err)?;
            for (key, value) in &encoded {
                match value {
                    Some(bytes) => {
                        table.insert(*key, bytes.as_slice()).map_err(db_err)?;
                    }
                    None => {
                        table.remove(*key).map_err(db_err)?;
                    }
                }
            }
        }
        // Dropping an uncommitted WriteTransaction aborts it
        wt.commit().map_err(db_err)?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let rt = self.db.begin_read().map_err(db_err)?;
        let table = rt.open_table(VALUES).map_err(db_err)?;

        let mut keys = Vec::new();
        for entry in table.range(prefix..).map_err(db_err)? {
            let (k, _) = entry.map_err(db_err)?;
            let key = k.value();
            if !key.starts_with(prefix) {
                break;
            }
            keys.push(key.to_string());
        }
        Ok(keys)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Non-durable store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, StoreValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, StoreValue>>> {
        self.values
            .lock()
            .map_err(|_| FocusError::Store("memory store lock poisoned".into()))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoreValue>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: StoreValue) -> Result<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn apply(&self, ops: &[StoreOp]) -> Result<()> {
        let mut values = self.lock()?;
        for op in ops {
            match op {
                StoreOp::Set(key, value) => {
                    values.insert(key.clone(), value.clone());
                }
                StoreOp::Delete(key) => {
                    values.remove(key);
                }
            }
        }
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .lock()?
            .range(prefix.to_string()..)
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
