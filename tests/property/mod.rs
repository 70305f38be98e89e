//! Property-based tests for path and aggregation invariants

mod aggregation;
