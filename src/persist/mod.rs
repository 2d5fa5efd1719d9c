//! Snapshot persistence of the day-keyed events through a key-value store.

/// In-process key-value store.
pub mod memory;
/// SQLite-backed key-value store.
pub mod sqlite;
/// Load-boundary schema checks.
pub mod validate;

use log::debug;
use thiserror::Error;

use crate::types::{DEFAULT_STORAGE_KEY, DayEvents};

use self::validate::{SchemaError, validate_day_events};

/// Persistence failures.
#[derive(Debug, Error)]
pub enum PersistError {
    /// SQLite backend failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Stored bytes are not the expected JSON shape.
    #[error("stored events are not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    /// Stored JSON parsed but violates the schema.
    #[error("stored events are invalid: {0}")]
    Schema(#[from] SchemaError),
    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result alias for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Byte-valued key-value store holding whole snapshots.
pub trait KvStore {
    /// Value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> PersistResult<Option<Vec<u8>>>;
    /// Overwrites the value under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> PersistResult<()>;
}

impl<K: KvStore + ?Sized> KvStore for Box<K> {
    fn get(&self, key: &str) -> PersistResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> PersistResult<()> {
        (**self).set(key, value)
    }
}

/// Loads and saves [`DayEvents`] under one fixed key.
pub struct EventRepository<K: KvStore> {
    kv: K,
    key: String,
}

impl<K: KvStore> EventRepository<K> {
    /// Repository using [`DEFAULT_STORAGE_KEY`].
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    /// Repository using a custom key.
    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Consumes the repository, returning the store.
    pub fn into_inner(self) -> K {
        self.kv
    }

    /// Reads the snapshot.
    ///
    /// A missing key yields an empty mapping. Present but malformed content
    /// is an error, never a silent reset.
    pub fn load(&self) -> PersistResult<DayEvents> {
        let Some(bytes) = self.kv.get(&self.key)? else {
            debug!("no stored events under `{}`", self.key);
            return Ok(DayEvents::new());
        };
        let days: DayEvents = serde_json::from_slice(&bytes)?;
        validate_day_events(&days)?;
        Ok(days)
    }

    /// Overwrites the stored snapshot with `days`.
    pub fn save(&mut self, days: &DayEvents) -> PersistResult<()> {
        let payload = serde_json::to_vec(days)?;
        self.kv.set(&self.key, &payload)?;
        debug!("saved {} days ({} bytes) under `{}`", days.len(), payload.len(), self.key);
        Ok(())
    }
}
