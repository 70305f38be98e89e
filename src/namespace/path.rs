//! Virtual path canonicalization and helpers
//!
//! Every path handled by the namespace engine is reduced to a single canonical
//! form: it starts with `/`, contains no `//`, and has no trailing `/` unless
//! it is exactly `/`. None of these functions touch the store.

/// Delimiter baked into key names.
pub const DELIMITER: char = '/';

/// Root of the virtual tree.
pub const ROOT: &str = "/";

/// Normalize any string into a canonical absolute path.
///
/// Never fails; empty or whitespace-only input becomes the root.
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == ROOT {
        return ROOT.to_string();
    }

    let mut result = String::with_capacity(trimmed.len() + 1);
    result.push(DELIMITER);
    for segment in trimmed.split(DELIMITER).filter(|s| !s.is_empty()) {
        if result.len() > 1 {
            result.push(DELIMITER);
        }
        result.push_str(segment);
    }
    result
}

/// True when the path normalizes to the root.
pub fn is_root(path: &str) -> bool {
    normalize(path) == ROOT
}

/// Prefix used to scan everything below `path`.
///
/// The root scans every key (empty prefix); any other directory scans
/// `<path>/`.
pub fn scan_prefix(path: &str) -> String {
    let canonical = normalize(path);
    if canonical == ROOT {
        return String::new();
    }
    format!("{}{}", canonical, DELIMITER)
}

/// Parent directory of `path`. The root is its own parent.
pub fn parent(path: &str) -> String {
    let canonical = normalize(path);
    match canonical.rfind(DELIMITER) {
        Some(0) | None => ROOT.to_string(),
        Some(i) => canonical[..i].to_string(),
    }
}

/// Last segment of `path`. The root's base name is `/`.
pub fn base_name(path: &str) -> String {
    let canonical = normalize(path);
    if canonical == ROOT {
        return ROOT.to_string();
    }
    match canonical.rfind(DELIMITER) {
        Some(i) => canonical[i + 1..].to_string(),
        None => canonical,
    }
}

/// Join a child name (or relative path) onto a directory.
pub fn join(directory: &str, name: &str) -> String {
    normalize(&format!("{}{}{}", normalize(directory), DELIMITER, name))
}
