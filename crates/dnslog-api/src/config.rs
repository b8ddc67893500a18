//! Server configuration for the DNS log API.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::logging::LogFormat;

/// Public sample DNS traffic log.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/cooingbicycle88/substack/main/tutorials/logs.csv";

/// Configuration for a DNS log API process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address (default: 0.0.0.0:7000).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Dataset location: an http(s) URL or a file path.
    #[serde(default = "default_source")]
    pub source: String,

    /// Send tables as a JSON string holding the table object, for clients
    /// that decode the body twice.
    #[serde(default)]
    pub double_encode: bool,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub source: Option<String>,
    pub log_format: Option<LogFormat>,
    pub double_encode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            source: default_source(),
            double_encode: false,
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
        }
    }
}

impl ServerConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::ServerError::Config(e.to_string()))
    }

    /// Apply command-line and environment values on top of the file.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(listen) = overrides.listen {
            self.listen = listen;
        }
        if let Some(source) = overrides.source {
            self.source = source;
        }
        if let Some(format) = overrides.log_format {
            self.log.format = format;
        }
        self.double_encode |= overrides.double_encode;
        self
    }
}

// Default value functions for serde.
fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 7000))
}

fn default_source() -> String {
    String::from(DEFAULT_SOURCE)
}

fn default_level() -> String {
    String::from("info")
}
