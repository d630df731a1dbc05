//! Configuration management for the Shareloop marketplace server
//!
//! Settings are resolved in three passes: defaults, then an optional
//! `shareloop.toml`, then `SL_*` environment variables. CLI flags are
//! applied last by the binary.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Storage and upload-boundary configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Load the demo users/items at startup
    pub seed_demo_data: bool,

    /// Maximum accepted size of a single uploaded image (bytes)
    pub max_upload_bytes: usize,

    /// Maximum number of image parts accepted per item
    pub max_images_per_item: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".parse().expect("default bind address"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            max_upload_bytes: 10 * 1024 * 1024, // upload boundary contract: 10MB per image
            max_images_per_item: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        // Try to load from config file first
        if let Ok(file_config) = Self::from_file("shareloop.toml") {
            config = file_config;
        }

        // Override with environment variables
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        use std::env;

        if let Ok(addr) = env::var("SL_HTTP_ADDR") {
            self.server.http_addr = addr
                .parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        }

        if let Ok(seed) = env::var("SL_SEED_DEMO_DATA") {
            self.storage.seed_demo_data = parse_bool(&seed)
                .ok_or_else(|| Error::config(format!("Invalid SL_SEED_DEMO_DATA: {}", seed)))?;
        }

        if let Ok(bytes) = env::var("SL_MAX_UPLOAD_BYTES") {
            self.storage.max_upload_bytes = bytes
                .parse()
                .map_err(|e| Error::config(format!("Invalid max upload bytes: {}", e)))?;
        }

        if let Ok(level) = env::var("SL_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = env::var("SL_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::config("Invalid log level")),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            _ => return Err(Error::config("Invalid log format")),
        }

        if self.storage.max_upload_bytes < 1024 {
            return Err(Error::config("Max upload size too small (minimum 1KB)"));
        }

        if self.storage.max_images_per_item == 0 {
            return Err(Error::config("Image cap must allow at least one image"));
        }

        Ok(())
    }

    /// Largest multipart body the server should accept for item creation
    pub fn max_request_body_bytes(&self) -> usize {
        // Image parts plus a little slack for the text fields
        self.storage.max_upload_bytes * self.storage.max_images_per_item + 64 * 1024
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
