//! Caller-held navigation state.
//!
//! The namespace engine only takes absolute paths. The "current directory"
//! of an operator session lives with the caller and is threaded through
//! these helpers explicitly.

use crate::error::{ApiError, NamespaceError};
use crate::namespace::path::{self, DELIMITER};
use crate::namespace::Namespace;
use crate::types::Entry;
use serde::Serialize;

/// Resolve `input` against `cwd`: absolute inputs stand alone, relative ones
/// are appended to the current directory.
pub fn resolve(cwd: &str, input: &str) -> String {
    let input = input.trim();
    if input.starts_with(DELIMITER) {
        path::normalize(input)
    } else {
        path::join(cwd, input)
    }
}

/// Directory above `cwd`; the root stays at the root.
pub fn up(cwd: &str) -> String {
    path::parent(cwd)
}

/// Directory `child` inside `cwd`.
pub fn down(cwd: &str, child: &str) -> String {
    path::join(cwd, child)
}

/// Where a jump lands: the directory to show and, for a leaf target, the
/// child to focus in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Jump {
    pub directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

/// Resolve a typed jump target.
///
/// A trailing `/` is a hint that the target must be a directory. Returns
/// `Ok(None)` for blank input.
pub async fn jump(ns: &Namespace, cwd: &str, raw: &str) -> Result<Option<Jump>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let wants_directory = raw.ends_with(DELIMITER) && raw != path::ROOT;
    let target = resolve(cwd, raw);

    let entry = ns.get(&target).await?;
    if wants_directory && !entry.is_directory() {
        return Err(ApiError::NotADirectory(target));
    }
    if entry.is_directory() {
        return Ok(Some(Jump {
            directory: entry.path,
            focus: None,
        }));
    }

    let directory = path::parent(&entry.path);
    let focus = entry.base_name();
    let siblings = ns.list(&directory).await?;
    if !siblings.iter().any(|e| e.base_name() == focus) {
        return Err(NamespaceError::NotFound(target).into());
    }
    Ok(Some(Jump {
        directory,
        focus: Some(focus),
    }))
}

/// Case-insensitive prefix completion over the display names of a listing.
///
/// Directories (with their trailing `/`) come before files; blank input
/// completes nothing.
pub fn complete(entries: &[Entry], typed: &str) -> Vec<String> {
    let needle = typed.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut directories: Vec<String> = Vec::new();
    let mut files: Vec<String> = Vec::new();
    for entry in entries {
        let name = entry.display_name();
        if !name.to_lowercase().starts_with(&needle) {
            continue;
        }
        if entry.is_directory() {
            directories.push(name);
        } else {
            files.push(name);
        }
    }
    directories.sort();
    files.sort();
    directories.extend(files);
    directories
}

/// Sibling path for renaming the folder at `current` to `new_name`.
///
/// The name must be a single non-empty segment.
pub fn rename_target(current: &str, new_name: &str) -> Result<String, ApiError> {
    let name = new_name.trim();
    if name.is_empty() || name.contains(DELIMITER) {
        return Err(ApiError::InvalidInput(
            "folder name must be non-empty and must not contain '/'".to_string(),
        ));
    }
    Ok(path::join(&path::parent(current), name))
}
