//! Integration tests for layered configuration

use crate::integration::test_utils::with_xdg_env;
use keywalk::config::{ConfigLoader, WalkerConfig};
use keywalk::exclude::parse_exclude_list;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_user_config_found_through_xdg() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = ConfigLoader::xdg_config_path().unwrap();
        assert_eq!(path, test_dir.path().join("keywalk").join("config.toml"));

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "exclude_prefixes = [\"/pcp:\"]\n[store]\ntree = \"db3\"\n[timeouts]\nlist_ms = 750\n",
        )
        .unwrap();

        let config = ConfigLoader::with_sources(Vec::new(), Some(path))
            .load_layers(None)
            .unwrap();
        assert_eq!(config.store.tree, "db3");
        assert_eq!(config.timeouts.list_ms, 750);
        assert_eq!(config.timeouts.rename_ms, 20_000);
        assert!(config.exclusion_set().is_excluded("/pcp:stats"));
    });
}

#[test]
fn test_explicit_file_wins_over_user_file() {
    let test_dir = TempDir::new().unwrap();
    let user = test_dir.path().join("user.toml");
    let explicit = test_dir.path().join("explicit.toml");
    std::fs::write(&user, "[store]\ntree = \"user\"\npath = \"/tmp/user-store\"\n").unwrap();
    std::fs::write(&explicit, "[store]\ntree = \"explicit\"\n").unwrap();

    let config = ConfigLoader::with_sources(Vec::new(), Some(user))
        .load_layers(Some(&explicit))
        .unwrap();
    assert_eq!(config.store.tree, "explicit");
    assert_eq!(config.store.path, PathBuf::from("/tmp/user-store"));
}

#[test]
fn test_cli_exclude_list_replaces_file_list() {
    let mut config = WalkerConfig::default();
    config.exclude_prefixes = vec!["/from-file".to_string()];
    config.apply_overrides(None, None, Some(parse_exclude_list(" /a, ,/b ")));

    let set = config.exclusion_set();
    assert!(set.is_excluded("/a/x"));
    assert!(set.is_excluded("/b"));
    assert!(!set.is_excluded("/from-file/x"));
}

#[test]
fn test_timeouts_become_deadlines() {
    let test_dir = TempDir::new().unwrap();
    let explicit = test_dir.path().join("walker.toml");
    std::fs::write(&explicit, "[timeouts]\ndelete_directory_ms = 1234\n").unwrap();

    let config = ConfigLoader::with_sources(Vec::new(), None)
        .load_layers(Some(&explicit))
        .unwrap();
    let deadlines = config.timeouts.to_deadlines();
    assert_eq!(deadlines.delete_directory.as_millis(), 1234);
    assert_eq!(deadlines.ping.as_millis(), 3_000);
}
