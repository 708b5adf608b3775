use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Value shipped in sample configs; treated as "not configured".
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIME_URL: &str = "https://www.timeapi.io/api/Time/current/coordinate";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// weather_url = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    #[serde(default = "default_time_url")]
    pub time_url: String,

    /// Per-request timeout; transport default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_weather_url() -> String {
    DEFAULT_WEATHER_URL.to_string()
}

fn default_time_url() -> String {
    DEFAULT_TIME_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            weather_url: default_weather_url(),
            time_url: default_time_url(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from disk (or defaults on first run) and apply the
    /// environment override for the API key.
    pub fn load() -> Result<Self> {
        let cfg = Self::load_file()?;
        Ok(cfg.with_env_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Load config from disk only, or return defaults if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycard", "skycard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the stored key with a non-empty environment value.
    pub fn with_env_override(mut self, env_value: Option<String>) -> Self {
        if let Some(key) = env_value.filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// The API key, unless it is missing, blank or still the placeholder.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn is_configured(&self) -> bool {
        self.credential().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_services() {
        let cfg = Config::default();
        assert_eq!(cfg.weather_url, DEFAULT_WEATHER_URL);
        assert_eq!(cfg.time_url, DEFAULT_TIME_URL);
        assert!(!cfg.is_configured());
    }

    #[test]
    fn placeholder_and_blank_keys_are_not_credentials() {
        let mut cfg = Config::default();

        cfg.api_key = Some(PLACEHOLDER_API_KEY.into());
        assert_eq!(cfg.credential(), None);

        cfg.api_key = Some("   ".into());
        assert_eq!(cfg.credential(), None);

        cfg.set_api_key(" abc123 ".into());
        assert_eq!(cfg.credential(), Some("abc123"));
    }

    #[test]
    fn env_value_overrides_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.with_env_override(Some("ENV_KEY".into()));
        assert_eq!(cfg.credential(), Some("ENV_KEY"));
    }

    #[test]
    fn empty_env_value_keeps_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.clone().with_env_override(Some(String::new()));
        assert_eq!(cfg.credential(), Some("FILE_KEY"));
        assert_eq!(cfg.with_env_override(None).credential(), Some("FILE_KEY"));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(r#"api_key = "k""#).expect("valid toml");
        assert_eq!(cfg.credential(), Some("k"));
        assert_eq!(cfg.time_url, DEFAULT_TIME_URL);
        assert_eq!(cfg.timeout_secs, None);
    }
}
