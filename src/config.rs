// Configuration File Support
//
// This module provides configuration file parsing for the smoke-test
// client. Supports TOML format with environment variable overrides.
// Configuration files are loaded from the XDG config directory:
// ~/.config/txsmoke/config.toml

use crate::rpc::protocol::{RpcRequest, TxFilter, TxListParams};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Wallet API server endpoint
    pub server: ServerConfig,

    /// Request parameters
    pub request: RequestConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Wallet API server endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 10000,
        }
    }
}

/// Request parameter configuration
///
/// Defaults reproduce the canonical smoke-test request byte-for-byte:
/// id 123, count 10, skip 0, empty filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequestConfig {
    /// JSON-RPC request identifier
    pub id: u64,

    /// Maximum number of transactions to return
    pub count: u32,

    /// Number of transactions to skip
    pub skip: u32,

    /// Optional asset filter
    pub asset_id: Option<u64>,

    /// Optional height filter
    pub height: Option<u64>,

    /// Optional status filter
    pub status: Option<u32>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            id: 123,
            count: 10,
            skip: 0,
            asset_id: None,
            height: None,
            status: None,
        }
    }
}

impl RequestConfig {
    /// Build the `tx_list` request described by this configuration
    pub fn to_request(&self) -> RpcRequest<TxListParams> {
        RpcRequest::tx_list(
            self.id,
            TxListParams {
                filter: TxFilter {
                    asset_id: self.asset_id,
                    height: self.height,
                    status: self.status,
                },
                count: self.count,
                skip: self.skip,
            },
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
            request: RequestConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default XDG config directory
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    /// If the config file does not exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    /// If the config file does not exist, returns default configuration.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default().apply_env_overrides());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file from {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file from {:?}", path))?;

        // Apply environment variable overrides
        let config = config.apply_env_overrides();

        // Validate configuration
        config.validate()?;

        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the default configuration file path
    ///
    /// Returns `~/.config/txsmoke/config.toml` on Linux/Mac
    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("io", "txsmoke", "txsmoke") {
            proj_dirs.config_dir().join("config.toml")
        } else {
            // Fallback if XDG dirs cannot be determined
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
                .join(".config")
                .join("txsmoke")
                .join("config.toml")
        }
    }

    /// Apply environment variable overrides to the configuration
    ///
    /// Environment variables take precedence over config file values:
    /// - TXSMOKE_HOST
    /// - TXSMOKE_PORT
    /// - TXSMOKE_LOG_LEVEL
    /// - TXSMOKE_LOG_FORMAT
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("TXSMOKE_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TXSMOKE_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                if port > 0 {
                    self.server.port = port;
                }
            }
        }
        if let Ok(level) = std::env::var("TXSMOKE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TXSMOKE_LOG_FORMAT") {
            self.logging.format = format;
        }

        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        // Validate logging level
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            ),
        }

        // Validate logging format
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => anyhow::bail!(
                "Invalid log format: {}. Must be one of: json, pretty, compact",
                self.logging.format
            ),
        }

        // Validate server endpoint
        if self.server.host.is_empty() {
            anyhow::bail!("Server host must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        // Validate request parameters
        if self.request.count == 0 {
            anyhow::bail!("Request count must be > 0");
        }

        Ok(())
    }

    /// Convert log level string to tracing::Level
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .to_lowercase()
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse log level: {}", e))
    }
}
