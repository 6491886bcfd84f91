use crate::domain::ShuffleMode;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_DIRECTORY: &str = "Lollypop";
const CONFIG_FILENAME: &str = "config.toml";
const DEFAULT_LOG_FILTER: &str = "lollypop=info,warn";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database path, the platform default when unset.
    pub database: Option<PathBuf>,
    pub shuffle: ShuffleMode,
    pub log_filter: String,
    pub web: WebConfig,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WebConfig {
    pub cache_dir: Option<PathBuf>,
    /// Skip the primary search provider entirely.
    pub fallback_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: None,
            shuffle: ShuffleMode::None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            web: WebConfig::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Config folder not present on system!"))?
            .join(CONFIG_DIRECTORY);

        Ok(dir.join(CONFIG_FILENAME))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let file_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&file_str).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_from_file(Self::default_path()?),
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str::<Config>(s)?)
    }
}
