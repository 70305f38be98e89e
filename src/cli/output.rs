//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, NamespaceError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Namespace(ns) if ns.is_timeout() => {
            format!("{} (the store did not answer in time)", ns)
        }
        ApiError::Namespace(NamespaceError::AlreadyExists(path)) => {
            format!("Cannot rename: {} already exists", path)
        }
        ApiError::Namespace(NamespaceError::SourceMissing(path)) => {
            format!("Cannot rename: {} does not exist", path)
        }
        other => other.to_string(),
    }
}
