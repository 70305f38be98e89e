//! Logging System
//!
//! Structured logging implementation using the `tracing` crate. Provides configurable
//! log levels, output formats, and destinations. Command output goes to stdout, so
//! logs default to a file under the data directory.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch (`--quiet` turns it off)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output includes "file"); resolved at startup when unset
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Default log file location: `<data dir>/keywalk.log`.
pub fn default_log_file() -> PathBuf {
    directories::ProjectDirs::from("", "", "keywalk")
        .map(|dirs| dirs.data_dir().join("keywalk.log"))
        .unwrap_or_else(|| PathBuf::from(".keywalk/keywalk.log"))
}

/// Pick the log file: CLI flag, then config file, then the default location.
pub fn resolve_log_file_path(cli_file: Option<PathBuf>, config_file: Option<PathBuf>) -> PathBuf {
    cli_file.or(config_file).unwrap_or_else(default_log_file)
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber.
///
/// Environment variables (`KEYWALK_LOG`, `KEYWALK_LOG_FORMAT`,
/// `KEYWALK_LOG_OUTPUT`, `KEYWALK_LOG_MODULES`) win over `config`, which the
/// binary has already merged with the command-line flags.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format: LogFormat = env_or("KEYWALK_LOG_FORMAT", &config.format).parse()?;
    let output: OutputDestinations = env_or("KEYWALK_LOG_OUTPUT", &config.output).parse()?;
    let json = format == LogFormat::Json;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if output.file {
        let path = config.file.clone().unwrap_or_else(default_log_file);
        layers.push(make_layer(json, false, open_log_file(&path)?));
    }
    if output.stderr {
        layers.push(make_layer(json, config.color, std::io::stderr));
    }
    if output.stdout {
        layers.push(make_layer(json, config.color, std::io::stdout));
    }

    Registry::default()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| ApiError::ConfigError(format!("Failed to install logger: {}", e)))
}

fn env_or(var: &str, fallback: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn make_layer<W>(json: bool, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);
    if json {
        layer.json().boxed()
    } else {
        layer.with_ansi(ansi).boxed()
    }
}

fn open_log_file(path: &Path) -> Result<std::sync::Mutex<std::fs::File>, ApiError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(std::sync::Mutex::new)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))
}

/// `KEYWALK_LOG` replaces the whole filter; otherwise the configured level
/// plus per-module directives from the config and `KEYWALK_LOG_MODULES`.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env("KEYWALK_LOG") {
        return Ok(filter);
    }
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let from_env = std::env::var("KEYWALK_LOG_MODULES").unwrap_or_default();
    let env_pairs = from_env.split(',').filter_map(|spec| {
        let (module, level) = spec.split_once('=')?;
        Some((module.trim().to_string(), level.trim().to_string()))
    });
    let config_pairs = config
        .modules
        .iter()
        .map(|(module, level)| (module.clone(), level.clone()));

    config_pairs
        .chain(env_pairs)
        .try_fold(EnvFilter::new(&config.level), |filter, (module, level)| {
            let directive = format!("{}={}", module, level)
                .parse::<Directive>()
                .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?;
            Ok(filter.add_directive(directive))
        })
}

/// Line format of every log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where log lines go.
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

impl FromStr for OutputDestinations {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stdout, stderr, file) = match s {
            "stdout" => (true, false, false),
            "stderr" => (false, true, false),
            "file" => (false, false, true),
            "file+stderr" => (false, true, true),
            other => {
                return Err(ApiError::ConfigError(format!(
                    "Invalid log output: {} (must be 'stdout', 'stderr', 'file', or 'file+stderr')",
                    other
                )))
            }
        };
        Ok(Self {
            stdout,
            stderr,
            file,
        })
    }
}
