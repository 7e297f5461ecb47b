use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Where the token, cached profile and preferences are kept
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./.sga/session.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Quiet period before a search query is sent
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Subscriptions ending within this many days count as expiring
    #[serde(default = "default_expiring_within_days")]
    pub expiring_within_days: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl UiConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            expiring_within_days: default_expiring_within_days(),
            currency: default_currency(),
        }
    }
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_expiring_within_days() -> i64 {
    7
}

fn default_currency() -> String {
    "MAD".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| "Failed to parse configuration file")?;
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
