//! Integration tests for per-operation deadlines

use crate::integration::test_utils::SlowStore;
use keywalk::error::{NamespaceError, StoreError};
use keywalk::exclude::ExclusionSet;
use keywalk::namespace::{Deadlines, Namespace};
use keywalk::store::MemoryKeyValueStore;
use std::sync::Arc;
use std::time::Duration;

fn slow_namespace(delay: Duration, deadlines: Deadlines) -> Namespace {
    let store = MemoryKeyValueStore::with_entries([("/a/b", "1")]);
    Namespace::new(Arc::new(SlowStore::new(store, delay)), ExclusionSet::empty())
        .with_deadlines(deadlines)
}

#[tokio::test(start_paused = true)]
async fn test_expired_deadline_is_a_transport_timeout() {
    let deadlines = Deadlines {
        list: Duration::from_millis(50),
        ..Deadlines::default()
    };
    let ns = slow_namespace(Duration::from_secs(1), deadlines);

    let err = ns.list("/a").await.unwrap_err();
    assert!(err.is_timeout());
    match err {
        NamespaceError::Transport {
            op,
            path,
            source: StoreError::Timeout(limit),
        } => {
            assert_eq!(op, "ls");
            assert_eq!(path, "/a");
            assert_eq!(limit, Duration::from_millis(50));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_ping_deadline() {
    let deadlines = Deadlines {
        ping: Duration::from_millis(10),
        ..Deadlines::default()
    };
    let ns = slow_namespace(Duration::from_millis(500), deadlines);
    assert!(ns.ping().await.unwrap_err().is_timeout());
}

#[tokio::test(start_paused = true)]
async fn test_operation_within_deadline_succeeds() {
    let ns = slow_namespace(Duration::from_millis(10), Deadlines::default());
    assert_eq!(ns.get("/a/b").await.unwrap().value(), Some("1"));
    ns.ping().await.unwrap();
}
