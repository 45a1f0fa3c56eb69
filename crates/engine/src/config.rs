//! Configuration via `tablebridge.toml`
//!
//! One file describes both ends of a transfer: the local database, the
//! endpoint this process serves, and the defaults used when calling a remote
//! one. A commented default file is written on first run; edit it and restart.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tablebridge_core::{Error, Result};

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tablebridge.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Local database settings (`[database]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SQLite file; `None` keeps the database in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// How long a statement waits on a locked database file.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// HTTP endpoint settings (`[server]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Route accepting transfer requests
    #[serde(default = "default_path")]
    pub path: String,
    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path() -> String {
    "/transfer".to_string()
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Defaults for outgoing transfer requests (`[client]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientDefaults {
    /// Whole-request timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Log output settings (`[logging]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Configuration loaded from `tablebridge.toml`.
///
/// Every section and key is optional; missing ones take their defaults.
///
/// # Example
///
/// ```toml
/// [database]
/// path = "tablebridge.db"
///
/// [server]
/// port = 9000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// `[database]`
    #[serde(default)]
    pub database: DatabaseConfig,
    /// `[server]`
    #[serde(default)]
    pub server: ServerConfig,
    /// `[client]`
    #[serde(default)]
    pub client: ClientDefaults,
    /// `[logging]`
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Reject values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if !self.server.path.starts_with('/') {
            return Err(Error::invalid_config(format!(
                "server.path '{}' must start with '/'",
                self.server.path
            )));
        }
        if self.server.max_body_bytes == 0 {
            return Err(Error::invalid_config("server.max_body_bytes must be positive"));
        }
        if self.client.timeout_ms == 0 {
            return Err(Error::invalid_config("client.timeout_ms must be positive"));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(Error::invalid_config(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# tablebridge configuration

[database]
# SQLite file holding local tables. Omit to keep everything in memory.
path = "tablebridge.db"
# busy_timeout_ms = 5000

[server]
host = "127.0.0.1"
port = 8080
# Route accepting "execute" and "save" requests
path = "/transfer"
# Largest accepted request body (16 MiB)
max_body_bytes = 16777216

[client]
# Whole-request timeout when calling a remote endpoint
timeout_ms = 30000

[logging]
# trace, debug, info, warn, error or off. RUST_LOG takes precedence.
level = "info"
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `true` when the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to write default config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        tracing::info!(target: "tablebridge::config", path = %path.display(), "wrote default config");
        Ok(true)
    }

    /// Load `path`, creating it with defaults first when missing.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        Self::write_default_if_missing(path)?;
        Self::from_file(path)
    }
}
