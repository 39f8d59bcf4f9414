// ABOUTME: Configuration loading for rewardbot.
// ABOUTME: Reads ~/.rewardbot/config.toml, applies env overrides, and names the data file paths.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable that overrides `api.genai_url`.
pub const GENAI_URL_ENV: &str = "REWARDBOT_GENAI_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

/// Remote query endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// When false the responder answers from the local intent table only.
    pub enabled: bool,
    pub genai_url: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            genai_url: "http://localhost:8083/api/genai".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Where the session is persisted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the default `~/.rewardbot/session.json`.
    pub session_file: Option<PathBuf>,
}

impl Config {
    /// Load config from ~/.rewardbot/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through a lookup function so tests need not touch the process env.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(GENAI_URL_ENV).filter(|s| !s.trim().is_empty()) {
            self.api.genai_url = url;
        }
    }

    /// Base directory for all rewardbot files.
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rewardbot")
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Path to the `.env` file with secrets and overrides.
    pub fn env_path() -> PathBuf {
        Self::data_dir().join(".env")
    }

    /// Path to the diagnostic log (the terminal belongs to the TUI).
    pub fn log_path() -> PathBuf {
        Self::data_dir().join("rewardbot.log")
    }

    /// Path to the persisted session store.
    pub fn session_path(&self) -> PathBuf {
        self.storage
            .session_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("session.json"))
    }
}
