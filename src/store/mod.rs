//! Key-value store capability
//!
//! The namespace engine only needs four round-trips from a store: a
//! cursor-driven prefix scan, a single-key string read, a single-key write and
//! a bulk delete. Any backend that provides these can be browsed as a tree.

pub mod memory;
pub mod persistence;

pub use memory::MemoryKeyValueStore;
pub use persistence::SledKeyValueStore;

use crate::error::StoreError;
use async_trait::async_trait;

/// Opaque scan position: the last key handed out, so the next page resumes
/// right after it. `START` begins an iteration and, when handed back by the
/// store, signals that the iteration is complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScanCursor(Option<String>);

impl ScanCursor {
    pub const START: ScanCursor = ScanCursor(None);

    /// Cursor that resumes strictly after `key`.
    pub fn after(key: impl Into<String>) -> Self {
        ScanCursor(Some(key.into()))
    }

    pub fn is_start(&self) -> bool {
        self.0.is_none()
    }

    /// Key the next page starts after, if any.
    pub fn resume_key(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// One batch of a prefix scan.
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub keys: Vec<String>,
    pub next_cursor: ScanCursor,
}

/// Outcome of reading a single key as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueRead {
    Text(String),
    Missing,
    /// The key exists but its value is not a string.
    WrongType,
}

/// Narrow store interface consumed by the namespace engine.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Return up to roughly `batch` keys starting with `prefix`, resuming at
    /// `cursor`. Keys may repeat across pages only if the keyspace changed
    /// mid-iteration.
    async fn scan_prefix(
        &self,
        prefix: &str,
        cursor: ScanCursor,
        batch: usize,
    ) -> Result<ScanPage, StoreError>;

    async fn get_value(&self, key: &str) -> Result<ValueRead, StoreError>;

    /// Overwrite `key` with `value`.
    async fn set_value(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete every listed key; returns how many existed.
    async fn delete_keys(&self, keys: &[String]) -> Result<u64, StoreError>;

    /// Reachability check used once at startup.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Make earlier writes durable. Stores without a write buffer have
    /// nothing to do.
    async fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Human-readable backend description for logs and status output.
    fn describe(&self) -> String;
}

/// Decode stored bytes the way a string-typed read sees them.
pub(crate) fn decode_value(bytes: &[u8]) -> ValueRead {
    match std::str::from_utf8(bytes) {
        Ok(text) => ValueRead::Text(text.to_string()),
        Err(_) => ValueRead::WrongType,
    }
}

/// Cut one page out of keys that already start after the cursor position.
///
/// Pulls at most `batch + 1` keys, so a page costs the same however deep
/// into the range it starts.
pub(crate) fn next_page<I>(keys: I, batch: usize) -> ScanPage
where
    I: Iterator<Item = String>,
{
    let batch = batch.max(1);
    let mut window = keys.take(batch + 1);
    let page: Vec<String> = window.by_ref().take(batch).collect();
    let next_cursor = match (window.next(), page.last()) {
        (Some(_), Some(last)) => ScanCursor::after(last.clone()),
        _ => ScanCursor::START,
    };
    ScanPage {
        keys: page,
        next_cursor,
    }
}
