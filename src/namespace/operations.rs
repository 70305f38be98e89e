//! Namespace operations over a flat key-value store.

use crate::error::{NamespaceError, StoreError};
use crate::exclude::ExclusionSet;
use crate::namespace::aggregate::{ChildSet, DIR_MARKER};
use crate::namespace::path::{self, ROOT};
use crate::namespace::scanner::KeyspaceScanner;
use crate::namespace::values::load_values;
use crate::store::{KeyValueStore, ValueRead};
use crate::types::Entry;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Per-operation deadlines. Prefix-wide operations get longer budgets than
/// single-key round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub ping: Duration,
    pub read: Duration,
    pub write: Duration,
    pub list: Duration,
    pub delete_directory: Duration,
    pub rename: Duration,
}

impl Default for Deadlines {
    fn default() -> Self {
        Self {
            ping: Duration::from_secs(3),
            read: Duration::from_secs(5),
            write: Duration::from_secs(5),
            list: Duration::from_secs(5),
            delete_directory: Duration::from_secs(10),
            rename: Duration::from_secs(20),
        }
    }
}

/// Filesystem view of a key-value store.
///
/// Stateless between calls: every operation takes absolute paths and
/// rebuilds what it needs from a fresh scan. Multi-key operations are not
/// atomic.
#[derive(Clone)]
pub struct Namespace {
    store: Arc<dyn KeyValueStore>,
    exclusions: ExclusionSet,
    deadlines: Deadlines,
}

impl Namespace {
    pub fn new(store: Arc<dyn KeyValueStore>, exclusions: ExclusionSet) -> Self {
        Self {
            store,
            exclusions,
            deadlines: Deadlines::default(),
        }
    }

    pub fn with_deadlines(mut self, deadlines: Deadlines) -> Self {
        self.deadlines = deadlines;
        self
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn deadlines(&self) -> &Deadlines {
        &self.deadlines
    }

    fn scanner(&self) -> KeyspaceScanner<'_> {
        KeyspaceScanner::new(self.store.as_ref(), &self.exclusions)
    }

    async fn scan(&self, op: &'static str, prefix: &str) -> Result<Vec<String>, NamespaceError> {
        self.scanner()
            .scan(prefix)
            .await
            .map_err(|e| NamespaceError::transport(op, prefix, e))
    }

    /// Run `work` under `limit`; expiry becomes a transport error for `op`.
    async fn within<T, F>(
        &self,
        op: &'static str,
        path: &str,
        limit: Duration,
        work: F,
    ) -> Result<T, NamespaceError>
    where
        F: Future<Output = Result<T, NamespaceError>>,
    {
        let started = Instant::now();
        let result = match tokio::time::timeout(limit, work).await {
            Ok(result) => result,
            Err(_) => Err(NamespaceError::transport(
                op,
                path,
                StoreError::Timeout(limit),
            )),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => debug!(op, path = %path, elapsed_ms, "namespace op ok"),
            Err(e) if e.is_transport() => {
                error!(op, path = %path, elapsed_ms, error = %e, "namespace op failed")
            }
            Err(e) => {
                debug!(op, path = %path, elapsed_ms, outcome = %e, "namespace op refused")
            }
        }
        result
    }

    /// Check that the store answers within the ping deadline.
    pub async fn ping(&self) -> Result<(), NamespaceError> {
        let description = self.store.describe();
        self.within("ping", ROOT, self.deadlines.ping, async {
            self.store
                .ping()
                .await
                .map_err(|e| NamespaceError::transport("ping", description.clone(), e))
        })
        .await
    }

    /// List the immediate children of `directory`.
    ///
    /// Directories come first, then files; each group is ordered by name. A
    /// child that is both a key and a prefix appears once in each group.
    pub async fn list(&self, directory: &str) -> Result<Vec<Entry>, NamespaceError> {
        let directory = path::normalize(directory);
        let prefix = path::scan_prefix(&directory);
        let entries = self
            .within("ls", &directory, self.deadlines.list, async {
                let keys = self.scan("ls", &prefix).await?;
                let children = ChildSet::aggregate(&prefix, &keys);
                let values = load_values(self.store.as_ref(), &children.leaf_keys()).await?;
                Ok(children.into_entries(&directory, &values))
            })
            .await?;
        debug!(op = "ls", dir = %directory, prefix = %prefix, count = entries.len(), "listed");
        Ok(entries)
    }

    /// Describe a single path.
    ///
    /// A direct key wins over a directory at the same path. Direct reads do
    /// not consult the exclusion set; the directory fallback does.
    pub async fn get(&self, key: &str) -> Result<Entry, NamespaceError> {
        let key = path::normalize(key);
        if key == ROOT {
            return Ok(Entry::directory(ROOT));
        }
        self.within("get", &key, self.deadlines.read, async {
            let read = self
                .store
                .get_value(&key)
                .await
                .map_err(|e| NamespaceError::transport("get", key.clone(), e))?;
            match read {
                ValueRead::Text(value) => return Ok(Entry::file(&key, Some(value))),
                ValueRead::WrongType => {
                    debug!(op = "get", key = %key, "non-string value; returning entry without value");
                    return Ok(Entry::file(&key, None));
                }
                ValueRead::Missing => {}
            }
            let descendants = self.scan("get", &path::scan_prefix(&key)).await?;
            if descendants.is_empty() {
                Err(NamespaceError::NotFound(key.clone()))
            } else {
                Ok(Entry::directory(&key))
            }
        })
        .await
    }

    /// Write `value` at `key`, overwriting any previous value.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), NamespaceError> {
        let key = path::normalize(key);
        if key == ROOT {
            return Err(NamespaceError::InvalidOperation {
                op: "set",
                path: key,
            });
        }
        self.within("set", &key, self.deadlines.write, async {
            self.store
                .set_value(&key, value)
                .await
                .map_err(|e| NamespaceError::transport("set", key.clone(), e))?;
            debug!(op = "set", key = %key, size = value.len(), "value written");
            Ok(())
        })
        .await
    }

    /// Make `directory` exist.
    ///
    /// Anything already below the directory satisfies the request; otherwise
    /// a marker key is written.
    pub async fn make_directory(&self, directory: &str) -> Result<(), NamespaceError> {
        let directory = path::normalize(directory);
        if directory == ROOT {
            return Ok(());
        }
        let prefix = path::scan_prefix(&directory);
        let marker = format!("{}{}", prefix, DIR_MARKER);
        self.within("mkdir", &directory, self.deadlines.write, async {
            let existing = self.scan("mkdir", &prefix).await?;
            if !existing.is_empty() {
                debug!(op = "mkdir", dir = %directory, count = existing.len(), "already populated");
                return Ok(());
            }
            self.store
                .set_value(&marker, "")
                .await
                .map_err(|e| NamespaceError::transport("mkdir", marker.clone(), e))
        })
        .await
    }

    /// Delete exactly `key`. Deleting an absent key succeeds.
    pub async fn delete(&self, key: &str) -> Result<(), NamespaceError> {
        let key = path::normalize(key);
        if key == ROOT {
            return Err(NamespaceError::InvalidOperation {
                op: "delete",
                path: key,
            });
        }
        self.within("del", &key, self.deadlines.write, async {
            self.store
                .delete_keys(std::slice::from_ref(&key))
                .await
                .map_err(|e| NamespaceError::transport("del", key.clone(), e))?;
            Ok(())
        })
        .await
    }

    /// Delete every visible key below `directory`, marker included.
    ///
    /// Returns how many keys the store removed. On the root this removes
    /// every key outside the exclusion set.
    pub async fn delete_directory(&self, directory: &str) -> Result<u64, NamespaceError> {
        let directory = path::normalize(directory);
        let prefix = path::scan_prefix(&directory);
        self.within(
            "deldir",
            &directory,
            self.deadlines.delete_directory,
            async {
                let keys = self.scan("deldir", &prefix).await?;
                if keys.is_empty() {
                    return Ok(0);
                }
                self.store
                    .delete_keys(&keys)
                    .await
                    .map_err(|e| NamespaceError::transport("deldir", directory.clone(), e))
            },
        )
        .await
    }

    /// Move every key below `old` to the same suffix below `new`.
    ///
    /// Copies all keys first and deletes the originals afterwards. A failure
    /// in between leaves data under both prefixes, or a partially copied
    /// target; nothing is rolled back. Returns how many keys were copied.
    pub async fn rename_directory(&self, old: &str, new: &str) -> Result<u64, NamespaceError> {
        let old_dir = path::normalize(old);
        let new_dir = path::normalize(new);
        let old_prefix = path::scan_prefix(&old_dir);
        let new_prefix = path::scan_prefix(&new_dir);
        if old_prefix == new_prefix {
            return Ok(0);
        }
        if old_dir == ROOT || new_dir == ROOT {
            return Err(NamespaceError::InvalidOperation {
                op: "rename",
                path: ROOT.to_string(),
            });
        }

        self.within("rename", &old_dir, self.deadlines.rename, async {
            let mut source_keys = self.scan("rename", &old_prefix).await?;
            if source_keys.is_empty() {
                return Err(NamespaceError::SourceMissing(old_dir.clone()));
            }
            let target_keys = self.scan("rename", &new_prefix).await?;
            if !target_keys.is_empty() {
                return Err(NamespaceError::AlreadyExists(new_dir.clone()));
            }
            source_keys.sort();

            let mut copied = 0u64;
            for old_key in &source_keys {
                let suffix = old_key
                    .strip_prefix(old_prefix.as_str())
                    .unwrap_or(old_key.as_str());
                let new_key = format!("{}{}", new_prefix, suffix);
                let context = format!("{} -> {}", old_key, new_key);
                let read = self
                    .store
                    .get_value(old_key)
                    .await
                    .map_err(|e| NamespaceError::transport("rename", context.clone(), e))?;
                let value = match read {
                    ValueRead::Text(value) => value,
                    ValueRead::Missing => {
                        debug!(op = "rename", key = %old_key, "source key vanished; skipping");
                        continue;
                    }
                    ValueRead::WrongType => {
                        return Err(NamespaceError::WrongType(old_key.clone()));
                    }
                };
                self.store
                    .set_value(&new_key, &value)
                    .await
                    .map_err(|e| NamespaceError::transport("rename", context, e))?;
                copied += 1;
            }

            self.store
                .delete_keys(&source_keys)
                .await
                .map_err(|e| NamespaceError::transport("rename", old_dir.clone(), e))?;
            debug!(op = "rename", from = %old_dir, to = %new_dir, copied, "directory renamed");
            Ok(copied)
        })
        .await
    }
}
