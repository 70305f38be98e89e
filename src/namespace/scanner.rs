//! Cursor-driven prefix scan with inline exclusion filtering.

use crate::error::StoreError;
use crate::exclude::ExclusionSet;
use crate::store::{KeyValueStore, ScanCursor};
use tracing::debug;

/// Keys requested per scan round-trip.
pub const SCAN_BATCH: usize = 1000;

/// Collects every visible key under a prefix.
pub struct KeyspaceScanner<'a> {
    store: &'a dyn KeyValueStore,
    exclusions: &'a ExclusionSet,
    batch: usize,
}

impl<'a> KeyspaceScanner<'a> {
    pub fn new(store: &'a dyn KeyValueStore, exclusions: &'a ExclusionSet) -> Self {
        Self {
            store,
            exclusions,
            batch: SCAN_BATCH,
        }
    }

    pub fn with_batch(mut self, batch: usize) -> Self {
        self.batch = batch.max(1);
        self
    }

    /// Return every non-excluded key starting with `prefix`.
    ///
    /// Iterates until the store hands back the start cursor. The order of
    /// the result carries no meaning.
    pub async fn scan(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut cursor = ScanCursor::START;
        let mut all = Vec::new();
        loop {
            let page = self.store.scan_prefix(prefix, cursor, self.batch).await?;
            for key in page.keys {
                if self.exclusions.is_excluded(&key) {
                    debug!(op = "scan", key = %key, prefix = %prefix, "excluded by prefix");
                    continue;
                }
                all.push(key);
            }
            if page.next_cursor.is_start() {
                break;
            }
            cursor = page.next_cursor;
        }
        Ok(all)
    }
}
