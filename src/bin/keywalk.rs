//! Keywalk CLI Binary
//!
//! Command-line interface for browsing a flat key-value keyspace as a directory tree.

use clap::Parser;
use keywalk::cli::{map_error, needs_store, render_config, Cli, RunContext};
use keywalk::config::{ConfigLoader, WalkerConfig};
use keywalk::error::ApiError;
use keywalk::exclude::parse_exclude_list;
use keywalk::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli, &config);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Keywalk CLI starting");

    if !needs_store(&cli.command) {
        match render_config(&config) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("{}", map_error(&e));
                process::exit(1);
            }
        }
        return;
    }

    let context = match RunContext::connect(config, &cli.cwd).await {
        Ok(ctx) => {
            info!("Store connection established");
            ctx
        }
        Err(e) => {
            error!("Error connecting to store: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command).await {
        Ok(output) => {
            info!("Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Load the layered configuration and fold in the store flags.
fn load_config(cli: &Cli) -> Result<WalkerConfig, ApiError> {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    config.apply_overrides(
        cli.store.clone(),
        cli.tree.clone(),
        cli.exclude_prefixes.as_deref().map(parse_exclude_list),
    );
    config.validate()?;
    Ok(config)
}

/// Build logging configuration from CLI args and the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, loaded: &WalkerConfig) -> LoggingConfig {
    let mut config = loaded.logging.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // An explicit --log-output value still takes precedence below.
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    let output_uses_file = config.output == "file" || config.output == "file+stderr";
    if config.enabled && output_uses_file {
        config.file = Some(keywalk::logging::resolve_log_file_path(
            cli.log_file.clone(),
            config.file.clone(),
        ));
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
