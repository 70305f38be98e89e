//! Property-based tests for child aggregation

use keywalk::namespace::{ChildSet, DIR_MARKER};
use keywalk::namespace::path::{join, scan_prefix};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

fn segment() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

/// Relative key paths of one to three segments.
fn relative_keys() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(segment(), 1..4), 0..30)
}

/// Test that every key yields exactly the child named by its first segment,
/// and that single-segment keys are the only leaves
#[test]
fn test_children_follow_first_segment_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&relative_keys(), |relative| {
            let directory = "/base";
            let prefix = scan_prefix(directory);
            let keys: Vec<String> = relative
                .iter()
                .map(|segments| join(directory, &segments.join("/")))
                .collect();

            let children = ChildSet::aggregate(&prefix, &keys);

            let expected_names: BTreeSet<&str> =
                relative.iter().map(|s| s[0].as_str()).collect();
            let names: BTreeSet<&str> = children.iter().map(|(name, _)| name).collect();
            prop_assert_eq!(names, expected_names);

            for segments in &relative {
                let summary = children.get(&segments[0]).unwrap();
                if segments.len() == 1 {
                    prop_assert!(summary.is_leaf());
                } else {
                    prop_assert!(summary.is_directory);
                }
            }

            Ok(())
        })
        .unwrap();
}

/// Test that entries list directories before files, and that a collision
/// yields one entry of each kind for the same path
#[test]
fn test_entries_ordering_and_collisions_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&relative_keys(), |relative| {
            let directory = "/base";
            let prefix = scan_prefix(directory);
            let mut keys: Vec<String> = relative
                .iter()
                .map(|segments| join(directory, &segments.join("/")))
                .collect();
            keys.push(format!("{}{}", prefix, DIR_MARKER));

            let children = ChildSet::aggregate(&prefix, &keys);
            let leaf_count = children.leaf_keys().len();
            let directory_count = children.iter().filter(|(_, c)| c.is_directory).count();

            let entries = children.into_entries(directory, &HashMap::new());
            prop_assert_eq!(entries.len(), leaf_count + directory_count);

            let first_file = entries
                .iter()
                .position(|e| !e.is_directory())
                .unwrap_or(entries.len());
            prop_assert!(entries[first_file..].iter().all(|e| !e.is_directory()));
            prop_assert!(entries.iter().all(|e| e.base_name() != DIR_MARKER));

            let dir_names: Vec<String> = entries[..first_file].iter().map(|e| e.base_name()).collect();
            let mut sorted = dir_names.clone();
            sorted.sort();
            prop_assert_eq!(dir_names, sorted);

            Ok(())
        })
        .unwrap();
}
