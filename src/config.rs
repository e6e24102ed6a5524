//! Client configuration loaded from TOML, with environment and CLI overrides

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const BACKEND_URL_ENV: &str = "SECOND_BRAIN_BACKEND_URL";
const CONFIG_FILE: &str = "config.toml";
const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_add_close_delay_ms")]
    pub add_close_delay_ms: u64,
    #[serde(default = "default_notice_timeout_secs")]
    pub notice_timeout_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            add_close_delay_ms: default_add_close_delay_ms(),
            notice_timeout_secs: default_notice_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            storage_path: None,
            request_timeout_secs: None,
            ui: UiConfig::default(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:3000/".to_string()
}
fn default_search_limit() -> usize {
    3
}
fn default_add_close_delay_ms() -> u64 {
    1200
}
fn default_notice_timeout_secs() -> u64 {
    5
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "second-brain")
}

impl Config {
    /// Load from an explicit path, or from the user config dir when present.
    /// A missing default config file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match project_dirs().map(|d| d.config_dir().join(CONFIG_FILE)) {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            config.backend_url = url;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Backend base URL, always ending in `/` so `api/v1/...` joins beneath it.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.backend_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).with_context(|| format!("Invalid backend URL: {}", self.backend_url))
    }

    pub fn storage_path(&self) -> PathBuf {
        if let Some(path) = &self.storage_path {
            return path.clone();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_dir().join(STORAGE_FILE),
            None => PathBuf::from(".cache").join(STORAGE_FILE),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn add_close_delay(&self) -> Duration {
        Duration::from_millis(self.ui.add_close_delay_ms)
    }

    pub fn notice_timeout(&self) -> Duration {
        Duration::from_secs(self.ui.notice_timeout_secs)
    }
}
