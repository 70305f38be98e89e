//! CLI parse: clap types for keywalk. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// keywalk - browse a flat key-value keyspace as a directory tree
#[derive(Parser, Debug)]
#[command(name = "keywalk")]
#[command(about = "Browse and edit a flat key-value keyspace as a directory tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the system and user files)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sled database directory (overrides store.path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Named tree inside the database (overrides store.tree)
    #[arg(long)]
    pub tree: Option<String>,

    /// Comma-separated key prefixes to hide (overrides exclude_prefixes)
    #[arg(long)]
    pub exclude_prefixes: Option<String>,

    /// Current directory used to resolve relative paths
    #[arg(long, default_value = "/")]
    pub cwd: String,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a directory
    Ls {
        /// Directory to list (default: current directory)
        path: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show a single key or directory
    Get {
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a value (overwrites)
    Set { path: String, value: String },
    /// Create a directory
    Mkdir { path: String },
    /// Delete a key, or a directory with --recursive
    Rm {
        path: String,
        /// Delete everything below the directory
        #[arg(short, long)]
        recursive: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Rename a directory (a bare NEW name renames in place)
    Mv { old: String, new: String },
    /// Resolve a jump target into a directory and focused entry
    Jump {
        target: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Complete a child name inside a directory
    Complete {
        prefix: String,
        /// Directory to complete in (default: current directory)
        dir: Option<String>,
    },
    /// Check that the store is reachable
    Ping,
    /// Print the effective configuration
    Config,
}
