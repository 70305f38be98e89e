//! Exclusion list for scans.
//!
//! Prefixes in the exclusion set hide keys from every scan-driven operation.
//! Matching is a plain string prefix test on the canonical form of the key,
//! so `/secret` hides both `/secret/x` and `/secretive`. Direct reads and
//! writes of a single key do not consult the set.

use crate::namespace::path;

/// Normalized, immutable set of hidden key prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    prefixes: Vec<String>,
}

impl ExclusionSet {
    /// Build a set from raw prefixes. Blank entries are dropped, the rest are
    /// normalized to canonical paths.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = prefixes
            .into_iter()
            .filter_map(|p| {
                let p = p.as_ref().trim();
                if p.is_empty() {
                    None
                } else {
                    Some(path::normalize(p))
                }
            })
            .collect();
        normalized.sort();
        normalized.dedup();
        Self {
            prefixes: normalized,
        }
    }

    /// Empty set: nothing is hidden.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// True when the canonical form of `key` starts with any excluded prefix.
    pub fn is_excluded(&self, key: &str) -> bool {
        if self.prefixes.is_empty() {
            return false;
        }
        let canonical = path::normalize(key);
        self.prefixes.iter().any(|p| canonical.starts_with(p.as_str()))
    }
}

/// Parse a comma-separated list of prefixes (the `--exclude-prefixes` form).
pub fn parse_exclude_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
