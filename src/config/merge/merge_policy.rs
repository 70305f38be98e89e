//! Merge rules: defaults, override order, conflict handling.

use crate::config::default_store_path;
use crate::store::persistence::DEFAULT_TREE;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Sources added afterwards override these keys; nested tables merge key by
/// key, and lists are replaced wholesale by the later source.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default(
            "store.path",
            default_store_path().to_string_lossy().to_string(),
        )?
        .set_default("store.tree", DEFAULT_TREE)?
        .set_default("timeouts.ping_ms", 3_000i64)?
        .set_default("timeouts.read_ms", 5_000i64)?
        .set_default("timeouts.write_ms", 5_000i64)?
        .set_default("timeouts.list_ms", 5_000i64)?
        .set_default("timeouts.delete_directory_ms", 10_000i64)?
        .set_default("timeouts.rename_ms", 20_000i64)
}
