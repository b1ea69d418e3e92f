//! Configuration management for tochka.
//!
//! Settings come from a `tochka.toml` / `tochka.json` file discovered in
//! the working directory or the user config dir, with serde defaults for
//! everything. The bot token is environment-only (`BOT_TOKEN`, loadable
//! from `.env`) so it never lands in a config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schema::{default_schemas, PartitionSchema};
use crate::source::{CsvSource, TableSource, XlsxSource};

/// Environment variable holding the Telegram bot token.
pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";

/// Config file names probed during discovery.
const CONFIG_BASENAMES: [&str; 2] = ["tochka.toml", "tochka.json"];

/// Telegram transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API endpoint. Override for test doubles or local proxies.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Long-poll timeout in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout: u64,
    /// HTTP request timeout in seconds; must exceed the poll timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}
fn default_poll_timeout() -> u64 {
    30
}
fn default_request_timeout() -> u64 {
    40
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            poll_timeout: default_poll_timeout(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tabular data file: an Excel workbook, or a directory of
    /// `<partition>.csv` files. Supports `~` and env var expansion.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Partition schemas in lookup priority order.
    #[serde(default = "default_schemas")]
    pub partitions: Vec<PartitionSchema>,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

fn default_data_file() -> String {
    "trading-points.xlsx".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            partitions: default_schemas(),
            telegram: TelegramConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist and parse; without
    /// one, the first discovered config file is used, falling back to
    /// defaults when none is found.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => match Self::discover() {
                Some(path) => Self::load_from_path(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific file path. Format is chosen by
    /// extension: TOML for `.toml`, JSON otherwise.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("Failed to parse TOML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("Failed to parse JSON config: {}", e))?,
        };

        Ok(config)
    }

    /// Probe the working directory, then the user config dir.
    fn discover() -> Option<PathBuf> {
        for name in CONFIG_BASENAMES {
            let candidate = PathBuf::from(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }
        let config_dir = dirs::config_dir()?.join("tochka");
        for name in ["config.toml", "config.json"] {
            let candidate = config_dir.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }
        None
    }

    /// Data file path with `~` and environment variables expanded.
    pub fn data_path(&self) -> PathBuf {
        let expanded = shellexpand::full(&self.data_file)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| self.data_file.clone());
        PathBuf::from(expanded)
    }

    /// Build the table source for the configured data file: a CSV
    /// directory if the path is a directory, an Excel workbook otherwise.
    pub fn open_source(&self) -> Box<dyn TableSource> {
        let path = self.data_path();
        if path.is_dir() {
            Box::new(CsvSource::new(path))
        } else {
            Box::new(XlsxSource::new(path))
        }
    }

    /// Bot token from the environment, if set and non-empty.
    pub fn bot_token(&self) -> Option<String> {
        std::env::var(ENV_BOT_TOKEN).ok().filter(|t| !t.is_empty())
    }
}
