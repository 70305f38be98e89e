//! Grouping of a flat key list into the immediate children of a directory.

use crate::namespace::path::{self, DELIMITER};
use crate::types::Entry;
use std::collections::{BTreeMap, HashMap};

/// Hidden key name that keeps an otherwise empty directory alive.
pub const DIR_MARKER: &str = ".dir";

/// What the keys under a prefix say about one child name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildSummary {
    /// Some key nests below this child.
    pub is_directory: bool,
    /// Full key when the child is itself a key.
    pub leaf_key: Option<String>,
}

impl ChildSummary {
    pub fn is_leaf(&self) -> bool {
        self.leaf_key.is_some()
    }
}

/// Children of one directory, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct ChildSet {
    children: BTreeMap<String, ChildSummary>,
}

impl ChildSet {
    /// Classify `keys` relative to `prefix` (as produced by
    /// [`path::scan_prefix`]).
    ///
    /// A child can collect both flags from different keys; both facts are kept.
    pub fn aggregate<I, S>(prefix: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut children: BTreeMap<String, ChildSummary> = BTreeMap::new();
        for key in keys {
            let key = key.as_ref();
            let rest = key.strip_prefix(prefix).unwrap_or(key);
            let rest = rest.trim_start_matches(DELIMITER);
            if rest.is_empty() {
                continue;
            }
            let (child, remainder) = match rest.split_once(DELIMITER) {
                Some((child, remainder)) => (child, Some(remainder)),
                None => (rest, None),
            };
            if child.is_empty() || child == DIR_MARKER {
                continue;
            }
            let summary = children.entry(child.to_string()).or_default();
            if remainder.is_some() {
                summary.is_directory = true;
            } else {
                summary.leaf_key = Some(key.to_string());
            }
        }
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ChildSummary> {
        self.children.get(name)
    }

    /// Name-ordered iteration.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChildSummary)> {
        self.children.iter().map(|(name, summary)| (name.as_str(), summary))
    }

    /// Keys whose values must be loaded to describe the leaves.
    pub fn leaf_keys(&self) -> Vec<String> {
        self.children
            .values()
            .filter_map(|summary| summary.leaf_key.clone())
            .collect()
    }

    /// Build entries under `directory`: directories first, then files, each
    /// group ordered by name. `values` maps leaf keys to their loaded values.
    pub fn into_entries(
        self,
        directory: &str,
        values: &HashMap<String, Option<String>>,
    ) -> Vec<Entry> {
        let mut directories = Vec::new();
        let mut files = Vec::new();
        for (name, summary) in self.children {
            let full = path::join(directory, &name);
            if summary.is_directory {
                directories.push(Entry::directory(&full));
            }
            if let Some(leaf_key) = summary.leaf_key {
                let value = values.get(&leaf_key).cloned().flatten();
                files.push(Entry::file(&full, value));
            }
        }
        directories.extend(files);
        directories
    }
}
