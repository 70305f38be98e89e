//! System config file source: /etc/keywalk/config.{toml,json}

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// Directory holding the system-wide config file.
pub const SYSTEM_CONFIG_DIR: &str = "/etc/keywalk";

/// Candidate system config files, in precedence order (later wins).
pub fn system_config_paths() -> Vec<PathBuf> {
    let dir = Path::new(SYSTEM_CONFIG_DIR);
    vec![dir.join("config.json"), dir.join("config.toml")]
}

/// Add every existing system config file to the builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    paths: &[PathBuf],
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;
    for path in paths {
        if path.is_file() {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
    }
    Ok(builder)
}
