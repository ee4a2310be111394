use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::provider::ProviderSettings;

/// Environment variable holding the OpenWeatherMap credential.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_UNITS: &str = "metric";
pub const DEFAULT_LANG: &str = "zh_cn";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration, optionally stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// lang = "zh_cn"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// OpenWeatherMap API key. Overridden by `OPENWEATHER_API_KEY` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    /// Unit system sent as `units`; "metric" means Celsius.
    pub units: String,
    /// Language code for condition descriptions.
    pub lang: String,
    /// Total request budget (connect + read).
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: DEFAULT_UNITS.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config dir.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-station", "weather-mcp")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay the API key from `OPENWEATHER_API_KEY`, if present.
    pub fn with_env(self) -> Self {
        self.with_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Replace the API key when `key` is non-empty; otherwise keep the current one.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Returns the API key, treating an empty string as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key().map(str::to_owned),
            units: self.units.clone(),
            lang: self.lang.clone(),
            timeout: self.timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_openweather_current_endpoint() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url, "https://api.openweathermap.org/data/2.5/weather");
        assert_eq!(cfg.units, "metric");
        assert_eq!(cfg.lang, "zh_cn");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert!(cfg.api_key().is_none());
    }

    #[test]
    fn empty_api_key_is_treated_as_absent() {
        let cfg = Config {
            api_key: Some(String::new()),
            ..Config::default()
        };

        assert!(cfg.api_key().is_none());
        assert!(cfg.provider_settings().api_key.is_none());
    }

    #[test]
    fn override_replaces_file_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        }
        .with_api_key(Some("ENV_KEY".into()));

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
    }

    #[test]
    fn empty_override_keeps_file_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        }
        .with_api_key(Some(String::new()))
        .with_api_key(None);

        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("api_key = \"KEY\"\ntimeout_secs = 3\n").unwrap();

        assert_eq!(cfg.api_key(), Some("KEY"));
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.lang, "zh_cn");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn provider_settings_carry_config_values() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            lang: "en".into(),
            timeout_secs: 4,
            ..Config::default()
        };

        let settings = cfg.provider_settings();
        assert_eq!(settings.api_key.as_deref(), Some("KEY"));
        assert_eq!(settings.lang, "en");
        assert_eq!(settings.units, "metric");
        assert_eq!(settings.timeout, Duration::from_secs(4));
    }
}
