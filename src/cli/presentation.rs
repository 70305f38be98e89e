//! CLI presentation: text and JSON formatters for listings, entries and jumps.

use crate::config::WalkerConfig;
use crate::error::ApiError;
use crate::navigation::Jump;
use crate::types::Entry;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{Cell, Color, Table};
use owo_colors::OwoColorize;

/// Longest value preview shown in a listing row.
const PREVIEW_CHARS: usize = 60;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// First line of `value`, cut to the preview width.
fn preview(value: &str) -> String {
    let first_line = value.lines().next().unwrap_or("");
    let mut out: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS || value.lines().nth(1).is_some() {
        out.push('…');
    }
    out
}

fn name_cell(entry: &Entry) -> Cell {
    let name = entry.display_name();
    if name.starts_with('_') {
        Cell::new(name).fg(Color::Yellow)
    } else if entry.is_directory() {
        Cell::new(name).fg(Color::Blue)
    } else {
        Cell::new(name)
    }
}

pub fn format_listing_text(directory: &str, entries: &[Entry]) -> String {
    let title = format!("[ {} ]", directory);
    if entries.is_empty() {
        return format!("{}\n(empty)", title.bold());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Kind", "Value"]);
    for entry in entries {
        let (kind, value) = if entry.is_directory() {
            ("dir", String::new())
        } else {
            match entry.value() {
                Some(v) => ("key", preview(v)),
                None => ("key", "<no value>".to_string()),
            }
        };
        table.add_row(vec![name_cell(entry), Cell::new(kind), Cell::new(value)]);
    }
    format!("{}\n{}", title.bold(), table)
}

pub fn format_listing_json(directory: &str, entries: &[Entry]) -> Result<String, ApiError> {
    to_json(&serde_json::json!({
        "directory": directory,
        "entries": entries,
    }))
}

/// Details view of one entry.
pub fn format_entry_text(entry: &Entry) -> String {
    let mut out = format!(
        "Full name: {}\nIs directory: {}",
        entry.path,
        entry.is_directory()
    );
    if !entry.is_directory() {
        match entry.value() {
            Some(value) => out.push_str(&format!("\n\nValue:\n{}", value)),
            None => out.push_str("\n\nValue: <no value>"),
        }
    }
    out
}

pub fn format_entry_json(entry: &Entry) -> Result<String, ApiError> {
    to_json(entry)
}

pub fn format_jump_text(jump: &Jump) -> String {
    match &jump.focus {
        Some(focus) => format!("directory: {}\nfocus: {}", jump.directory, focus),
        None => format!("directory: {}", jump.directory),
    }
}

pub fn format_jump_json(jump: &Jump) -> Result<String, ApiError> {
    to_json(jump)
}

pub fn format_config_toml(config: &WalkerConfig) -> Result<String, ApiError> {
    toml::to_string_pretty(config).map_err(|e| ApiError::Serialization(e.to_string()))
}
