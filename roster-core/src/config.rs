//! Configuration management for review-roster
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (ROSTER_*)
//! 3. Config file (~/.config/review-roster/config.toml)
//! 4. Default values

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use humantime_serde::re::humantime::parse_duration;
use roster_db::DatabaseConfig;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,

    /// Upper bound for a single request, including its unit of work
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub addr: Option<SocketAddr>,
    pub database_path: Option<PathBuf>,
    pub max_connections: Option<u32>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/review-roster/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("review-roster").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - ROSTER_ADDR: listen address, e.g. `127.0.0.1:8080`
    /// - ROSTER_DATABASE_PATH (or DATABASE_URL): SQLite file
    /// - ROSTER_MAX_CONNECTIONS: pool size
    /// - ROSTER_REQUEST_TIMEOUT: request timeout, e.g. `30s`
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(addr) = lookup("ROSTER_ADDR") {
            self.server.addr = addr
                .parse()
                .map_err(|e| Error::Config(format!("Invalid ROSTER_ADDR {:?}: {}", addr, e)))?;
        }

        if let Some(path) = lookup("ROSTER_DATABASE_PATH").or_else(|| lookup("DATABASE_URL")) {
            let path = path.strip_prefix("sqlite://").unwrap_or(&path);
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup("ROSTER_MAX_CONNECTIONS") {
            self.database.max_connections = max.parse().map_err(|e| {
                Error::Config(format!("Invalid ROSTER_MAX_CONNECTIONS {:?}: {}", max, e))
            })?;
        }

        if let Some(timeout) = lookup("ROSTER_REQUEST_TIMEOUT") {
            self.server.request_timeout = parse_duration(&timeout).map_err(|e| {
                Error::Config(format!("Invalid ROSTER_REQUEST_TIMEOUT {:?}: {}", timeout, e))
            })?;
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(addr) = overrides.addr {
            self.server.addr = addr;
        }

        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }

        if let Some(max) = overrides.max_connections {
            self.database.max_connections = max;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        config_path: Option<&Path>,
        overrides: CliOverrides,
    ) -> Result<Self> {
        let base = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        Ok(base.with_env_overrides()?.with_cli_overrides(overrides))
    }
}
