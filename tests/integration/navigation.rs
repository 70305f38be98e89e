//! Integration tests for caller-side navigation helpers

use crate::integration::test_utils::namespace_with;
use keywalk::error::{ApiError, NamespaceError};
use keywalk::navigation::{complete, jump, resolve, up, Jump};

#[test]
fn test_up_and_resolve() {
    assert_eq!(up("/a/b"), "/a");
    assert_eq!(resolve("/a", "b/"), "/a/b");
    assert_eq!(resolve("/a/b", "/x//y/"), "/x/y");
}

#[tokio::test]
async fn test_jump_to_file_focuses_it_in_parent() {
    let (ns, _) = namespace_with(&[("/a/b/c", "1")]);

    let landed = jump(&ns, "/", "/a/b/c").await.unwrap();
    assert_eq!(
        landed,
        Some(Jump {
            directory: "/a/b".to_string(),
            focus: Some("c".to_string()),
        })
    );
}

#[tokio::test]
async fn test_jump_relative_to_directory() {
    let (ns, _) = namespace_with(&[("/a/b/c", "1")]);

    let landed = jump(&ns, "/a", "b").await.unwrap().unwrap();
    assert_eq!(landed.directory, "/a/b");
    assert_eq!(landed.focus, None);
}

#[tokio::test]
async fn test_jump_with_directory_hint_onto_file_fails() {
    let (ns, _) = namespace_with(&[("/a/b", "1")]);

    let err = jump(&ns, "/", "/a/b/").await.unwrap_err();
    assert!(matches!(err, ApiError::NotADirectory(ref p) if p == "/a/b"));
}

#[tokio::test]
async fn test_jump_to_missing_path_is_not_found() {
    let (ns, _) = namespace_with(&[("/a/b", "1")]);

    let err = jump(&ns, "/", "/nope").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Namespace(NamespaceError::NotFound(_))
    ));
    assert_eq!(jump(&ns, "/", "   ").await.unwrap(), None);
}

#[tokio::test]
async fn test_complete_over_listing() {
    let (ns, _) = namespace_with(&[("/Config", "1"), ("/cache/x", "2"), ("/data", "3")]);

    let entries = ns.list("/").await.unwrap();
    assert_eq!(complete(&entries, "c"), vec!["cache/", "Config"]);
}
