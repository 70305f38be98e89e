//! In-process key-value store

use crate::error::StoreError;
use crate::store::{decode_value, next_page, KeyValueStore, ScanCursor, ScanPage, ValueRead};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

/// Ordered in-memory store with the same byte semantics as the sled backend.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from `(key, value)` pairs.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        {
            let mut map = store.entries.write();
            for (k, v) in entries {
                map.insert(k.into(), v.into().into_bytes());
            }
        }
        store
    }

    /// Store raw bytes under `key`; non-UTF-8 bytes read back as a wrong type.
    pub fn insert_raw(&self, key: impl Into<String>, value: Vec<u8>) {
        self.entries.write().insert(key.into(), value);
    }

    /// Snapshot of every key, in order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn scan_prefix(
        &self,
        prefix: &str,
        cursor: ScanCursor,
        batch: usize,
    ) -> Result<ScanPage, StoreError> {
        let lower = match cursor.resume_key() {
            Some(last) => Bound::Excluded(last.to_string()),
            None => Bound::Included(prefix.to_string()),
        };
        let map = self.entries.read();
        let matching = map
            .range((lower, Bound::Unbounded))
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(prefix))
            .cloned();
        Ok(next_page(matching, batch))
    }

    async fn get_value(&self, key: &str) -> Result<ValueRead, StoreError> {
        Ok(match self.entries.read().get(key) {
            Some(bytes) => decode_value(bytes),
            None => ValueRead::Missing,
        })
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(key.to_string(), value.as_bytes().to_vec());
        Ok(())
    }

    async fn delete_keys(&self, keys: &[String]) -> Result<u64, StoreError> {
        let mut map = self.entries.write();
        let removed = keys.iter().filter(|k| map.remove(k.as_str()).is_some()).count();
        Ok(removed as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
