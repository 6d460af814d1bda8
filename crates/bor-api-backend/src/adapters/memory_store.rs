//! In-memory key-value store.
//!
//! Stands in for the chain database in tests and for light fixtures.

use crate::ports::KeyValueStore;
use parking_lot::RwLock;
use shared_types::KVStoreError;
use std::collections::HashMap;

/// In-memory key-value store.
///
/// Writes go through `&self` so one store can be shared behind an `Arc`
/// between the accessor under test and the fixture writer.
#[derive(Default)]
pub struct InMemoryKVStore {
    data: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key.
    pub fn put(&self, key: &[u8], value: &[u8]) {
        self.data.write().insert(key.to_vec(), value.to_vec());
    }

    /// Remove a key.
    pub fn delete(&self, key: &[u8]) {
        self.data.write().remove(key);
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.read().contains_key(key))
    }
}
