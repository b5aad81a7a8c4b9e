use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_API_BASE_URL, DEFAULT_PERFORMANCE_DAYS, DEFAULT_TOP_HOLDINGS_LIMIT};
use crate::duration::deserialize_duration_opt;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "FUNDBOARD_API_URL";

/// Performance window of the fund detail page.
pub const DEFAULT_DETAIL_PERFORMANCE_DAYS: u32 = 90;

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend, without the `/api/v1` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional per-request timeout (e.g. "30s"). Unset means requests may
    /// wait indefinitely.
    #[serde(
        default,
        deserialize_with = "deserialize_duration_opt",
        skip_serializing
    )]
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: None,
        }
    }
}

/// Display defaults used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Performance window requested when `--days` is not given.
    pub performance_days: u32,

    /// Window used by the fund detail page when `--days` is not given.
    pub detail_performance_days: u32,

    /// Number of top holdings requested when `--limit` is not given.
    pub top_holdings_limit: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            performance_days: DEFAULT_PERFORMANCE_DAYS,
            detail_performance_days: DEFAULT_DETAIL_PERFORMANCE_DAYS,
            top_holdings_limit: DEFAULT_TOP_HOLDINGS_LIMIT,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for local preferences. If relative, resolved from the config
    /// file location. Defaults to the config file's directory.
    pub data_dir: Option<PathBuf>,

    pub api: ApiConfig,

    pub display: DisplayConfig,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve the data directory path.
    ///
    /// If `data_dir` is set and relative, it's resolved relative to `config_dir`.
    /// If `data_dir` is not set, returns `config_dir`.
    pub fn resolve_data_dir(&self, config_dir: &Path) -> PathBuf {
        match &self.data_dir {
            Some(data_dir) if data_dir.is_absolute() => data_dir.clone(),
            Some(data_dir) => config_dir.join(data_dir),
            None => config_dir.to_path_buf(),
        }
    }
}

/// Loaded configuration with resolved paths and environment overrides applied.
///
/// Built once at startup; the API base URL is not re-read per request.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub api: ApiConfig,
    pub display: DisplayConfig,
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./fundboard.toml` if it exists in current directory
/// 2. `~/.local/share/fundboard/fundboard.toml` (XDG data directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("fundboard.toml");
    if local_config.exists() {
        return local_config;
    }

    if let Some(data_dir) = dirs::data_dir() {
        return data_dir.join("fundboard").join("fundboard.toml");
    }

    local_config
}

impl ResolvedConfig {
    /// Load and resolve config from a file path.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_path = config_path
            .canonicalize()
            .with_context(|| format!("Config file not found: {}", config_path.display()))?;

        let config_dir = config_path
            .parent()
            .context("Config file has no parent directory")?;

        let config = Config::load(&config_path)?;
        let mut resolved = Self::from_config(config, config_dir);
        resolved.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(resolved)
    }

    /// Load config, falling back to defaults if the file doesn't exist.
    ///
    /// Without a file, the intended parent directory of the config path
    /// becomes the data directory.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load(config_path);
        }

        let config_path = if config_path.is_relative() {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(config_path)
        } else {
            config_path.to_path_buf()
        };

        let config_dir = config_path
            .parent()
            .context("Config path has no parent directory")?;

        let mut resolved = Self::from_config(Config::default(), config_dir);
        resolved.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(resolved)
    }

    fn from_config(config: Config, config_dir: &Path) -> Self {
        Self {
            data_dir: config.resolve_data_dir(config_dir),
            api: config.api,
            display: config.display,
        }
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            tracing::debug!(base_url = %url, "using API base URL from {API_URL_ENV}");
            self.api.base_url = url.trim().to_string();
        }
    }
}
