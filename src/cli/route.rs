//! CLI route: single route table and run context. Dispatches to the namespace and presentation.

use crate::config::WalkerConfig;
use crate::error::{ApiError, NamespaceError};
use crate::namespace::Namespace;
use crate::navigation::{self, resolve};
use crate::store::{KeyValueStore, SledKeyValueStore};
use dialoguer::Confirm;
use std::sync::Arc;
use std::time::Instant;

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_config_toml, format_entry_json, format_entry_text, format_jump_json, format_jump_text,
    format_listing_json, format_listing_text,
};

/// Runtime context for CLI execution: the namespace over the configured
/// store, the caller's current directory, and the effective configuration.
pub struct RunContext {
    namespace: Namespace,
    cwd: String,
    config: WalkerConfig,
}

impl RunContext {
    /// Open the configured sled tree and check that it answers.
    pub async fn connect(config: WalkerConfig, cwd: &str) -> Result<Self, ApiError> {
        std::fs::create_dir_all(&config.store.path)
            .map_err(|e| ApiError::Store(crate::error::StoreError::IoError(e)))?;
        let store = SledKeyValueStore::open(&config.store.path, &config.store.tree)?;
        let context = Self::with_store(Arc::new(store), config, cwd);
        context.namespace.ping().await?;
        tracing::debug!(store = %context.namespace.store().describe(), "store reachable");
        Ok(context)
    }

    /// Build a context over any store; no reachability check is made.
    pub fn with_store(store: Arc<dyn KeyValueStore>, config: WalkerConfig, cwd: &str) -> Self {
        let namespace = Namespace::new(store, config.exclusion_set())
            .with_deadlines(config.timeouts.to_deadlines());
        Self {
            namespace,
            cwd: crate::namespace::path::normalize(cwd),
            config,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        let result = self.execute_inner(command).await;
        match &result {
            Ok(_) => tracing::info!(
                command = name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "command completed"
            ),
            Err(e) => tracing::warn!(
                command = name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "command failed"
            ),
        }
        result
    }

    async fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Ls { path, format } => {
                let directory = match path {
                    Some(p) => resolve(&self.cwd, p),
                    None => self.cwd.clone(),
                };
                let entries = self.namespace.list(&directory).await?;
                if format == "json" {
                    format_listing_json(&directory, &entries)
                } else {
                    Ok(format_listing_text(&directory, &entries))
                }
            }
            Commands::Get { path, format } => {
                let entry = self.namespace.get(&resolve(&self.cwd, path)).await?;
                if format == "json" {
                    format_entry_json(&entry)
                } else {
                    Ok(format_entry_text(&entry))
                }
            }
            Commands::Set { path, value } => {
                let key = resolve(&self.cwd, path);
                self.namespace.set(&key, value).await?;
                self.persist().await?;
                Ok(format!("Set {}", key))
            }
            Commands::Mkdir { path } => {
                let directory = resolve(&self.cwd, path);
                self.namespace.make_directory(&directory).await?;
                self.persist().await?;
                Ok(format!("Created {}/", directory.trim_end_matches('/')))
            }
            Commands::Rm {
                path,
                recursive,
                yes,
            } => self.handle_remove(path, *recursive, *yes).await,
            Commands::Mv { old, new } => self.handle_rename(old, new).await,
            Commands::Jump { target, format } => {
                let jump = navigation::jump(&self.namespace, &self.cwd, target)
                    .await?
                    .ok_or_else(|| ApiError::InvalidInput("jump target is empty".to_string()))?;
                if format == "json" {
                    format_jump_json(&jump)
                } else {
                    Ok(format_jump_text(&jump))
                }
            }
            Commands::Complete { prefix, dir } => {
                let directory = match dir {
                    Some(d) => resolve(&self.cwd, d),
                    None => self.cwd.clone(),
                };
                let entries = self.namespace.list(&directory).await?;
                Ok(navigation::complete(&entries, prefix).join("\n"))
            }
            Commands::Ping => {
                self.namespace.ping().await?;
                Ok(format!("PONG {}", self.namespace.store().describe()))
            }
            Commands::Config => render_config(&self.config),
        }
    }

    async fn handle_remove(&self, path: &str, recursive: bool, yes: bool) -> Result<String, ApiError> {
        let target = resolve(&self.cwd, path);

        if recursive {
            if !yes && !confirm(&format!("Delete {} and everything below it?", target))? {
                return Err(ApiError::Cancelled);
            }
            let removed = self.namespace.delete_directory(&target).await?;
            self.persist().await?;
            return Ok(format!("Deleted {} keys under {}", removed, target));
        }

        match self.namespace.get(&target).await {
            Ok(entry) if entry.is_directory() => {
                return Err(ApiError::InvalidInput(format!(
                    "{} is a directory; use --recursive to delete it",
                    target
                )));
            }
            Ok(_) | Err(NamespaceError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
        self.namespace.delete(&target).await?;
        self.persist().await?;
        Ok(format!("Deleted {}", target))
    }

    async fn handle_rename(&self, old: &str, new: &str) -> Result<String, ApiError> {
        let source = resolve(&self.cwd, old);
        let target = if new.contains('/') {
            resolve(&self.cwd, new)
        } else {
            navigation::rename_target(&source, new)?
        };
        let moved = self.namespace.rename_directory(&source, &target).await?;
        self.persist().await?;
        Ok(format!("Renamed {} -> {} ({} keys)", source, target, moved))
    }

    /// Flush the store after a command that changed it.
    async fn persist(&self) -> Result<(), ApiError> {
        self.namespace.store().flush().await?;
        Ok(())
    }
}

/// Effective configuration as TOML; needs no store.
pub fn render_config(config: &WalkerConfig) -> Result<String, ApiError> {
    format_config_toml(config)
}

fn confirm(prompt: &str) -> Result<bool, ApiError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| ApiError::InvalidInput(format!("Confirmation failed: {}", e)))
}
