//! Keywalk: a Filesystem View over a Flat Key-Value Keyspace
//!
//! Keys such as `/app/config/db` are read as paths. The namespace engine turns
//! prefix scans into directory listings and runs single-key and bulk edits
//! (delete a whole directory, rename a directory) under per-operation deadlines.

pub mod cli;
pub mod config;
pub mod error;
pub mod exclude;
pub mod logging;
pub mod namespace;
pub mod navigation;
pub mod store;
pub mod types;
