//! Configuration System
//!
//! Layered configuration for the keywalk CLI: built-in defaults, then the
//! system-wide file, then the per-user file, then an explicit `--config`
//! file. Command-line flags are applied last by the caller.

use crate::error::ApiError;
use crate::exclude::ExclusionSet;
use crate::logging::LoggingConfig;
use crate::namespace::Deadlines;
use crate::store::persistence::DEFAULT_TREE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Key prefixes hidden from listings and directory operations
    #[serde(default)]
    pub exclude_prefixes: Vec<String>,

    /// Store location and keyspace
    #[serde(default)]
    pub store: StoreConfig,

    /// Per-operation deadlines
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the keyspace lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Sled database directory
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Named tree inside the database
    #[serde(default = "default_tree")]
    pub tree: String,
}

pub(crate) fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "keywalk")
        .map(|dirs| dirs.data_dir().join("store"))
        .unwrap_or_else(|| PathBuf::from(".keywalk/store"))
}

fn default_tree() -> String {
    DEFAULT_TREE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            tree: default_tree(),
        }
    }
}

/// Deadlines in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_ping_ms")]
    pub ping_ms: u64,
    #[serde(default = "default_single_key_ms")]
    pub read_ms: u64,
    #[serde(default = "default_single_key_ms")]
    pub write_ms: u64,
    #[serde(default = "default_single_key_ms")]
    pub list_ms: u64,
    #[serde(default = "default_delete_directory_ms")]
    pub delete_directory_ms: u64,
    #[serde(default = "default_rename_ms")]
    pub rename_ms: u64,
}

fn default_ping_ms() -> u64 {
    3_000
}

fn default_single_key_ms() -> u64 {
    5_000
}

fn default_delete_directory_ms() -> u64 {
    10_000
}

fn default_rename_ms() -> u64 {
    20_000
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            ping_ms: default_ping_ms(),
            read_ms: default_single_key_ms(),
            write_ms: default_single_key_ms(),
            list_ms: default_single_key_ms(),
            delete_directory_ms: default_delete_directory_ms(),
            rename_ms: default_rename_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn to_deadlines(&self) -> Deadlines {
        Deadlines {
            ping: Duration::from_millis(self.ping_ms),
            read: Duration::from_millis(self.read_ms),
            write: Duration::from_millis(self.write_ms),
            list: Duration::from_millis(self.list_ms),
            delete_directory: Duration::from_millis(self.delete_directory_ms),
            rename: Duration::from_millis(self.rename_ms),
        }
    }

    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("ping_ms", self.ping_ms),
            ("read_ms", self.read_ms),
            ("write_ms", self.write_ms),
            ("list_ms", self.list_ms),
            ("delete_directory_ms", self.delete_directory_ms),
            ("rename_ms", self.rename_ms),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(format!("timeouts.{} must be greater than zero", name));
            }
        }
        Ok(())
    }
}

impl WalkerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();

        if self.store.path.as_os_str().is_empty() {
            errors.push("store.path cannot be empty".to_string());
        }
        if self.store.tree.trim().is_empty() {
            errors.push("store.tree cannot be empty".to_string());
        }
        if let Err(e) = self.timeouts.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }

    /// Apply command-line overrides; each given flag wins over the files.
    pub fn apply_overrides(
        &mut self,
        store_path: Option<PathBuf>,
        tree: Option<String>,
        exclude_prefixes: Option<Vec<String>>,
    ) {
        if let Some(path) = store_path {
            self.store.path = path;
        }
        if let Some(tree) = tree {
            self.store.tree = tree;
        }
        if let Some(prefixes) = exclude_prefixes {
            self.exclude_prefixes = prefixes;
        }
    }

    pub fn exclusion_set(&self) -> ExclusionSet {
        ExclusionSet::new(&self.exclude_prefixes)
    }
}
