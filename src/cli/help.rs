//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string recorded with every command log line (e.g. "ls", "rm").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Ls { .. } => "ls",
        Commands::Get { .. } => "get",
        Commands::Set { .. } => "set",
        Commands::Mkdir { .. } => "mkdir",
        Commands::Rm {
            recursive: true, ..
        } => "rm.recursive",
        Commands::Rm { .. } => "rm",
        Commands::Mv { .. } => "mv",
        Commands::Jump { .. } => "jump",
        Commands::Complete { .. } => "complete",
        Commands::Ping => "ping",
        Commands::Config => "config",
    }
}

/// Whether the command talks to the store at all.
pub fn needs_store(command: &Commands) -> bool {
    !matches!(command, Commands::Config)
}
