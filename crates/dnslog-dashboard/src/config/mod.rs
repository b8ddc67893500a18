//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::{OutputFormat, ViewSettings};

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data service base URL, used when `API_HOST` is unset.
    pub api_host: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Rows shown per table.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Longest histogram bar, in characters.
    #[serde(default = "default_histogram_width")]
    pub histogram_width: usize,

    /// Histogram bins shown.
    #[serde(default = "default_max_bins")]
    pub max_bins: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: None,
            output_format: None,
            timeout_secs: default_timeout_secs(),
            max_rows: default_max_rows(),
            histogram_width: default_histogram_width(),
            max_bins: default_max_bins(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_max_rows() -> usize {
    ViewSettings::default().max_rows
}

fn default_histogram_width() -> usize {
    ViewSettings::default().histogram_width
}

fn default_max_bins() -> usize {
    ViewSettings::default().max_bins
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "dnslog", "dnslog-dashboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set a key from `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_host" => self.api_host = Some(value.to_string()),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "timeout_secs" | "timeout" => self.timeout_secs = value.parse()?,
            "max_rows" => self.max_rows = value.parse()?,
            "histogram_width" => self.histogram_width = value.parse()?,
            "max_bins" => self.max_bins = value.parse()?,
            _ => anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 api_host         - Data service URL (overridden by API_HOST)\n  \
                 output_format    - Default output format (pretty/json/csv/yaml)\n  \
                 timeout_secs     - Request timeout in seconds\n  \
                 max_rows         - Rows shown per table\n  \
                 histogram_width  - Longest histogram bar\n  \
                 max_bins         - Histogram bins shown",
                key
            ),
        }
        Ok(())
    }

    /// Rendering limits.
    pub const fn view(&self) -> ViewSettings {
        ViewSettings {
            max_rows: self.max_rows,
            histogram_width: self.histogram_width,
            max_bins: self.max_bins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.view(), ViewSettings::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("api_host", "http://api:7000").unwrap();
        config.set("output", "json").unwrap();
        config.set("max_rows", "5").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_host.as_deref(), Some("http://api:7000"));
        assert_eq!(loaded.output_format, Some(OutputFormat::Json));
        assert_eq!(loaded.max_rows, 5);
    }

    #[test]
    fn test_set_rejects_unknown_and_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api_key", "x").is_err());
        assert!(config.set("max_rows", "lots").is_err());
    }
}
