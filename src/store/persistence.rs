//! Sled-backed key-value store

use crate::error::StoreError;
use crate::store::{decode_value, next_page, KeyValueStore, ScanCursor, ScanPage, ValueRead};
use async_trait::async_trait;
use sled;
use std::ops::Bound;
use std::path::{Path, PathBuf};

/// Name of sled's default keyspace.
pub const DEFAULT_TREE: &str = "default";

/// Sled-based implementation of KeyValueStore
///
/// One sled database can hold several named trees; each tree is an
/// independent keyspace, selected at open time. Blocking sled calls run on
/// tokio's blocking pool so that per-operation deadlines can abandon them.
#[derive(Clone)]
pub struct SledKeyValueStore {
    tree: sled::Tree,
    path: PathBuf,
    tree_name: String,
}

impl SledKeyValueStore {
    /// Open (or create) the database at `path` and select `tree_name`.
    pub fn open<P: AsRef<Path>>(path: P, tree_name: &str) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref()).map_err(|e| {
            StoreError::Backend(format!(
                "Failed to open sled database at {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_db(&db, path.as_ref(), tree_name)
    }

    /// Select a tree from an already-open database.
    pub fn from_db(db: &sled::Db, path: &Path, tree_name: &str) -> Result<Self, StoreError> {
        let tree = if tree_name == DEFAULT_TREE {
            (**db).clone()
        } else {
            db.open_tree(tree_name)?
        };
        Ok(Self {
            tree,
            path: path.to_path_buf(),
            tree_name: tree_name.to_string(),
        })
    }

    /// Store raw bytes under `key`; used to import values that are not strings.
    pub fn insert_raw(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.tree.insert(key.as_bytes(), value)?;
        Ok(())
    }

    async fn blocking<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(sled::Tree) -> Result<T, StoreError> + Send + 'static,
    {
        let tree = self.tree.clone();
        tokio::task::spawn_blocking(move || work(tree))
            .await
            .map_err(|e| StoreError::Backend(format!("Store task failed: {}", e)))?
    }
}

fn key_from_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[async_trait]
impl KeyValueStore for SledKeyValueStore {
    async fn scan_prefix(
        &self,
        prefix: &str,
        cursor: ScanCursor,
        batch: usize,
    ) -> Result<ScanPage, StoreError> {
        let prefix = prefix.to_string();
        let batch = batch.max(1);
        self.blocking(move |tree| {
            let range = match cursor.resume_key() {
                Some(last) => tree.range::<&[u8], _>((
                    Bound::Excluded(last.as_bytes()),
                    Bound::Unbounded,
                )),
                None => tree.scan_prefix(prefix.as_bytes()),
            };
            let mut keys = Vec::with_capacity(batch + 1);
            for item in range.keys() {
                let key = item?;
                if !key.starts_with(prefix.as_bytes()) {
                    break;
                }
                keys.push(key_from_bytes(&key));
                if keys.len() > batch {
                    break;
                }
            }
            Ok(next_page(keys.into_iter(), batch))
        })
        .await
    }

    async fn get_value(&self, key: &str) -> Result<ValueRead, StoreError> {
        let key = key.to_string();
        self.blocking(move |tree| {
            Ok(match tree.get(key.as_bytes())? {
                Some(bytes) => decode_value(&bytes),
                None => ValueRead::Missing,
            })
        })
        .await
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let key = key.to_string();
        let value = value.to_string();
        self.blocking(move |tree| {
            tree.insert(key.as_bytes(), value.as_bytes())?;
            Ok(())
        })
        .await
    }

    async fn delete_keys(&self, keys: &[String]) -> Result<u64, StoreError> {
        let keys = keys.to_vec();
        self.blocking(move |tree| {
            let mut removed = 0u64;
            let mut batch = sled::Batch::default();
            for key in &keys {
                if tree.contains_key(key.as_bytes())? {
                    removed += 1;
                }
                batch.remove(key.as_bytes());
            }
            tree.apply_batch(batch)?;
            Ok(removed)
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.blocking(|tree| {
            tree.first()?;
            Ok(())
        })
        .await
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.blocking(|tree| {
            tree.flush()?;
            Ok(())
        })
        .await
    }

    fn describe(&self) -> String {
        format!("sled:{} (tree {})", self.path.display(), self.tree_name)
    }
}
