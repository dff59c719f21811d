use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

// Default configuration
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_HISTORY_LIMIT: u32 = 30;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 200;
/// Environment variable that overrides `api_base`.
pub const API_BASE_ENV: &str = "CHAT_API_BASE";

/// The server accepts `limit` in this range.
const HISTORY_LIMIT_RANGE: (u32, u32) = (1, 200);
const MIN_POLL_INTERVAL_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persisted client settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub api_base: String,
    pub history_limit: u32,
    pub poll_interval_ms: u64,
    pub request_timeout_secs: u64,
    pub system_prompt: Option<String>,
    pub max_message_chars: usize,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_secs: 60,
            system_prompt: None,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
            theme: "dark".to_string(),
        }
    }
}

impl Settings {
    /// Clamp values into the ranges the client and server support.
    pub fn normalized(mut self) -> Self {
        let (lo, hi) = HISTORY_LIMIT_RANGE;
        self.history_limit = self.history_limit.clamp(lo, hi);
        self.poll_interval_ms = self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self.max_message_chars = self.max_message_chars.max(1);
        if self.api_base.trim().is_empty() {
            self.api_base = DEFAULT_API_BASE.to_string();
        }
        self.system_prompt = self
            .system_prompt
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    /// Apply `CHAT_API_BASE` when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                self.api_base = base.trim().to_string();
            }
        }
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn settings_path() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from("com", "codecheck", "codecheck-chat").ok_or(ConfigError::NoConfigDir)?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.join("settings.json"))
}

pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    Ok(settings.normalized())
}

/// Load settings from the platform config dir, falling back to defaults.
pub fn load_settings() -> Settings {
    let loaded = settings_path().and_then(|path| {
        if path.exists() {
            load_settings_from(&path)
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
    });
    match loaded {
        Ok(settings) => settings.with_env_overrides().normalized(),
        Err(e) => {
            warn!(error = %e, "failed to load settings, using defaults");
            Settings::default().with_env_overrides()
        }
    }
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let mut file = fs::File::create(path)?;
    let data = serde_json::to_string_pretty(settings)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    save_settings_to(&settings_path()?, settings)
}
