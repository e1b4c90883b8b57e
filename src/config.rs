//! Configuration loading and management.
//!
//! Settings resolve from lowest to highest priority:
//! 1. Built-in defaults
//! 2. YAML file (`TODOLIST_CONFIG_PATH`, else `todolist/config.yaml` if present)
//! 3. Environment variables (`TODOLIST_DB_PATH`, `TODOLIST_HOST`, `TODOLIST_PORT`)
//!
//! CLI flags are applied on top by the binary.

use crate::db::Database;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Default project-local config file.
pub const DEFAULT_CONFIG_FILE: &str = "todolist/config.yaml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// How long to wait on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("todolist/todo.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Config {
    /// Load configuration from a YAML file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve configuration from an explicit file, the environment, or defaults.
    ///
    /// An explicit path that cannot be loaded is an error. The default file is
    /// optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os("TODOLIST_CONFIG_PATH").map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db_path) = lookup("TODOLIST_DB_PATH") {
            self.database.path = PathBuf::from(db_path);
        }

        if let Some(host) = lookup("TODOLIST_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("TODOLIST_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid TODOLIST_PORT"),
            }
        }
    }

    /// Ensure the database directory exists.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.database.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Build the storage handle described by this configuration.
    pub fn database(&self) -> Database {
        Database::new(&self.database.path)
            .with_busy_timeout(Duration::from_millis(self.database.busy_timeout_ms))
    }

    /// The `host:port` string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
