use hashbrown::HashMap;

use super::{KvStore, PersistResult};

/// Key-value store held in memory, the equivalent of browser local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryKv {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `value` under `key`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let mut kv = Self::new();
        kv.entries.insert(key.into(), value.into());
        kv
    }

    /// Raw bytes under `key`.
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> PersistResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> PersistResult<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
