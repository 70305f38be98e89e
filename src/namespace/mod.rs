//! Namespace engine
//!
//! Maps a flat keyspace onto a virtual directory tree using `/` inside key
//! names. Nothing is cached: listings are derived from prefix scans on every
//! call, and directories exist only as key prefixes or `.dir` marker keys.

pub mod aggregate;
pub mod operations;
pub mod path;
pub mod scanner;
pub mod values;

pub use aggregate::{ChildSet, ChildSummary, DIR_MARKER};
pub use operations::{Deadlines, Namespace};
pub use scanner::KeyspaceScanner;
