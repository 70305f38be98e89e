//! CLI domain: parse, route, help, output, and presentation only.
//! No namespace logic; the single route table dispatches to [`crate::namespace::Namespace`].

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, needs_store};
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_toml, format_entry_json, format_entry_text, format_jump_json, format_jump_text,
    format_listing_json, format_listing_text,
};
pub use route::{render_config, RunContext};
