//! Config facade: single entry point for loading WalkerConfig.

use crate::config::merge::merge_policy::builder_with_defaults;
use crate::config::sources::{global_file, system_file};
use crate::config::WalkerConfig;
use crate::error::ApiError;
use config::File;
use std::path::{Path, PathBuf};

/// Loads WalkerConfig from the standard sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    system_paths: Vec<PathBuf>,
    global_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader over the standard locations.
    pub fn standard() -> Self {
        Self {
            system_paths: system_file::system_config_paths(),
            global_path: global_file::global_config_path(),
        }
    }

    /// Loader over explicit locations; used by tests and packaging.
    pub fn with_sources(system_paths: Vec<PathBuf>, global_path: Option<PathBuf>) -> Self {
        Self {
            system_paths,
            global_path,
        }
    }

    /// Path of the per-user config file, if a home directory is known.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Load defaults, system file and user file.
    pub fn load() -> Result<WalkerConfig, ApiError> {
        Self::standard().load_layers(None)
    }

    /// Load the standard layers plus an explicit file, which must exist.
    pub fn load_from_file(path: &Path) -> Result<WalkerConfig, ApiError> {
        Self::standard().load_layers(Some(path))
    }

    /// Merge every layer this loader knows about, then validate.
    pub fn load_layers(&self, explicit: Option<&Path>) -> Result<WalkerConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = system_file::add_to_builder(builder, &self.system_paths)?;
        let mut builder = global_file::add_to_builder(builder, self.global_path.as_deref())?;

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ApiError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: WalkerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
