//! HealthAgent configuration system.
//!
//! Loaded from `~/.healthagent/config.toml` when present, then overridden by
//! `HEALTHAGENT_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HealthAgentError, Result};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthAgentConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl HealthAgentConfig {
    /// Load config from the default path (~/.healthagent/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HealthAgentError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| HealthAgentError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the given path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| HealthAgentError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `HEALTHAGENT_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (env-like).
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HEALTHAGENT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HEALTHAGENT_PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid HEALTHAGENT_PORT={port:?}"),
            }
        }
        if let Some(origin) = lookup("HEALTHAGENT_ALLOWED_ORIGIN") {
            self.server.allowed_origin = origin;
        }
        if let Some(db_path) = lookup("HEALTHAGENT_DB_PATH") {
            self.database.path = db_path;
        }
        if let Some(kb_path) = lookup("HEALTHAGENT_KB_PATH") {
            self.knowledge.path = Some(kb_path);
        }
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the HealthAgent home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".healthagent")
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Frontend origin allowed by CORS, in addition to the local dev origins.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }
fn default_allowed_origin() -> String { "http://localhost:5173".into() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Fall back to an in-memory store when the database file cannot be opened.
    #[serde(default = "bool_true")]
    pub memory_fallback: bool,
}

fn bool_true() -> bool { true }
fn default_db_path() -> String { "~/.healthagent/healthagent.db".into() }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            memory_fallback: true,
        }
    }
}

impl DatabaseConfig {
    /// Database path with `~` expanded. `:memory:` is passed through.
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).to_string())
    }
}

/// Knowledge base configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON corpus file. The bundled corpus is used when unset.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_k")]
    pub default_k: usize,
}

fn default_k() -> usize { 3 }

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_k: default_k(),
        }
    }
}

impl KnowledgeConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }
}
