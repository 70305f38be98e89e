//! Entry types returned by the namespace engine.

use crate::namespace::path;
use serde::{Deserialize, Serialize};

/// What an entry denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    /// A leaf key. `value` is absent when the stored value is not a string
    /// or vanished between scan and read.
    File { value: Option<String> },
}

/// A single listed node of the virtual tree.
///
/// A collision (a key that is also a prefix of other keys) is reported as two
/// entries sharing a path, one of each kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "EntryRecord", into = "EntryRecord")]
pub struct Entry {
    pub path: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn directory(path: &str) -> Self {
        Self {
            path: path::normalize(path),
            kind: EntryKind::Directory,
        }
    }

    pub fn file(path: &str, value: Option<String>) -> Self {
        Self {
            path: path::normalize(path),
            kind: EntryKind::File { value },
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { value } => value.as_deref(),
            EntryKind::Directory => None,
        }
    }

    pub fn base_name(&self) -> String {
        path::base_name(&self.path)
    }

    /// Base name with a trailing `/` for directories, so that a collision
    /// pair renders as two distinct names.
    pub fn display_name(&self) -> String {
        let base = self.base_name();
        if self.is_directory() && base != path::ROOT {
            format!("{}/", base)
        } else {
            base
        }
    }
}

/// Flat wire form: `{ path, is_directory, value }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryRecord {
    path: String,
    is_directory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        if record.is_directory {
            Entry::directory(&record.path)
        } else {
            Entry::file(&record.path, record.value)
        }
    }
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        let is_directory = entry.is_directory();
        let value = match entry.kind {
            EntryKind::File { value } => value,
            EntryKind::Directory => None,
        };
        EntryRecord {
            path: entry.path,
            is_directory,
            value,
        }
    }
}
