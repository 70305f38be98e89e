//! Integration tests for namespace operations over the memory backend

use crate::integration::test_utils::{namespace_with, BrokenStore};
use keywalk::error::NamespaceError;
use keywalk::exclude::ExclusionSet;
use keywalk::namespace::Namespace;
use keywalk::types::Entry;
use std::sync::Arc;

fn value(s: &str) -> Option<String> {
    Some(s.to_string())
}

#[tokio::test]
async fn test_set_then_list_round_trip() {
    let (ns, _) = namespace_with(&[]);
    ns.set("/a/b", "v1").await.unwrap();

    let entries = ns.list("/a").await.unwrap();
    assert_eq!(entries, vec![Entry::file("/a/b", value("v1"))]);
}

#[tokio::test]
async fn test_list_orders_directories_before_files() {
    let (ns, _) = namespace_with(&[
        ("/z", "last"),
        ("/a", "first"),
        ("/m/x", "1"),
        ("/b/y", "2"),
    ]);

    let entries = ns.list("/").await.unwrap();
    assert_eq!(
        entries,
        vec![
            Entry::directory("/b"),
            Entry::directory("/m"),
            Entry::file("/a", value("first")),
            Entry::file("/z", value("last")),
        ]
    );
}

#[tokio::test]
async fn test_list_accepts_non_canonical_paths() {
    let (ns, _) = namespace_with(&[("/a/b/c", "1")]);

    let canonical = ns.list("/a").await.unwrap();
    assert_eq!(ns.list("a/").await.unwrap(), canonical);
    assert_eq!(ns.list("  //a// ").await.unwrap(), canonical);
    assert_eq!(canonical, vec![Entry::directory("/a/b")]);
}

#[tokio::test]
async fn test_list_missing_directory_is_empty() {
    let (ns, _) = namespace_with(&[("/a", "1")]);
    assert!(ns.list("/nowhere").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_hides_marker_but_keeps_directory() {
    let (ns, _) = namespace_with(&[("/x/.dir", "")]);

    assert_eq!(ns.list("/").await.unwrap(), vec![Entry::directory("/x")]);
    assert!(ns.list("/x").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_make_directory_is_idempotent() {
    let (ns, store) = namespace_with(&[]);
    ns.make_directory("/x").await.unwrap();
    ns.make_directory("/x").await.unwrap();

    assert_eq!(store.keys(), vec!["/x/.dir".to_string()]);
    assert_eq!(ns.list("/").await.unwrap(), vec![Entry::directory("/x")]);
    assert!(ns.get("/x").await.unwrap().is_directory());
}

#[tokio::test]
async fn test_make_directory_on_root_writes_nothing() {
    let (ns, store) = namespace_with(&[]);
    ns.make_directory("/").await.unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_delete_then_absent() {
    let (ns, _) = namespace_with(&[("/a/b", "v1"), ("/a/c", "v2")]);
    ns.delete("/a/b").await.unwrap();

    let err = ns.get("/a/b").await.unwrap_err();
    assert!(matches!(err, NamespaceError::NotFound(ref p) if p == "/a/b"));
    assert_eq!(
        ns.list("/a").await.unwrap(),
        vec![Entry::file("/a/c", value("v2"))]
    );
}

#[tokio::test]
async fn test_delete_leaves_descendants_of_same_name() {
    let (ns, store) = namespace_with(&[("/p", "1"), ("/p/q", "2")]);
    ns.delete("/p").await.unwrap();
    assert_eq!(store.keys(), vec!["/p/q".to_string()]);
}

#[tokio::test]
async fn test_collision_lists_both_entries() {
    let (ns, _) = namespace_with(&[("/p", "1"), ("/p/q", "2")]);

    let entries = ns.list("/").await.unwrap();
    assert_eq!(
        entries,
        vec![Entry::directory("/p"), Entry::file("/p", value("1"))]
    );
    assert_eq!(ns.get("/p").await.unwrap(), Entry::file("/p", value("1")));
    assert_eq!(
        ns.list("/p").await.unwrap(),
        vec![Entry::file("/p/q", value("2"))]
    );
}

#[tokio::test]
async fn test_delete_directory_removes_all_descendants() {
    let (ns, store) = namespace_with(&[
        ("/x/a", "1"),
        ("/x/b/c", "2"),
        ("/x/.dir", ""),
        ("/xy", "keep"),
        ("/x", "leaf"),
    ]);

    let removed = ns.delete_directory("/x").await.unwrap();
    assert_eq!(removed, 3);
    assert!(ns.list("/x").await.unwrap().is_empty());
    assert_eq!(store.keys(), vec!["/x".to_string(), "/xy".to_string()]);
}

#[tokio::test]
async fn test_delete_directory_of_nothing_is_noop() {
    let (ns, store) = namespace_with(&[("/a", "1")]);
    assert_eq!(ns.delete_directory("/missing").await.unwrap(), 0);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_rename_directory_preserves_values() {
    let (ns, _) = namespace_with(&[("/old/a", "1"), ("/old/b/c", "2")]);

    let moved = ns.rename_directory("/old", "/new").await.unwrap();
    assert_eq!(moved, 2);
    assert_eq!(ns.get("/new/a").await.unwrap().value(), Some("1"));
    assert_eq!(ns.get("/new/b/c").await.unwrap().value(), Some("2"));
    assert!(ns.list("/old").await.unwrap().is_empty());
    assert!(matches!(
        ns.get("/old").await.unwrap_err(),
        NamespaceError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_rename_onto_existing_target_fails() {
    let (ns, store) = namespace_with(&[("/old/a", "1"), ("/new/z", "9")]);

    let err = ns.rename_directory("/old", "/new").await.unwrap_err();
    assert!(matches!(err, NamespaceError::AlreadyExists(ref p) if p == "/new"));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_rename_missing_source_fails() {
    let (ns, _) = namespace_with(&[("/other", "1")]);

    let err = ns.rename_directory("/old", "/new").await.unwrap_err();
    assert!(matches!(err, NamespaceError::SourceMissing(ref p) if p == "/old"));
}

#[tokio::test]
async fn test_rename_does_not_move_same_named_leaf() {
    let (ns, store) = namespace_with(&[("/old", "leaf"), ("/old/a", "1")]);

    ns.rename_directory("/old", "/new").await.unwrap();
    assert_eq!(store.keys(), vec!["/new/a".to_string(), "/old".to_string()]);
}

#[tokio::test]
async fn test_root_writes_are_invalid() {
    let (ns, _) = namespace_with(&[("/a", "1")]);

    let err = ns.set("/", "x").await.unwrap_err();
    assert!(matches!(err, NamespaceError::InvalidOperation { op: "set", .. }));
    let err = ns.delete("  ").await.unwrap_err();
    assert!(matches!(err, NamespaceError::InvalidOperation { op: "delete", .. }));

    assert_eq!(ns.list("/").await.unwrap(), vec![Entry::file("/a", value("1"))]);
    assert!(ns.get("/").await.unwrap().is_directory());
}

#[tokio::test]
async fn test_non_string_value_has_no_value() {
    let (ns, store) = namespace_with(&[("/a/text", "t")]);
    store.insert_raw("/a/blob", vec![0xde, 0xad, 0xbe, 0xef]);

    let entries = ns.list("/a").await.unwrap();
    assert_eq!(
        entries,
        vec![
            Entry::file("/a/blob", None),
            Entry::file("/a/text", value("t")),
        ]
    );
    assert_eq!(ns.get("/a/blob").await.unwrap(), Entry::file("/a/blob", None));
}

#[tokio::test]
async fn test_set_overwrites() {
    let (ns, _) = namespace_with(&[("/k", "old")]);
    ns.set("k", "new").await.unwrap();
    assert_eq!(ns.get("/k").await.unwrap().value(), Some("new"));
}

#[tokio::test]
async fn test_transport_errors_carry_operation_and_path() {
    let ns = Namespace::new(Arc::new(BrokenStore), ExclusionSet::empty());

    let err = ns.list("/a").await.unwrap_err();
    match err {
        NamespaceError::Transport { op, path, .. } => {
            assert_eq!(op, "ls");
            assert_eq!(path, "/a");
        }
        other => panic!("expected transport error, got {:?}", other),
    }

    let err = ns.set("/a/b", "v").await.unwrap_err();
    assert!(matches!(err, NamespaceError::Transport { op: "set", .. }));
    assert!(!err.is_timeout());
}
