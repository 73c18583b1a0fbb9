//! Configuration management
//!
//! Settings live in `settings.json` in the data directory:
//! ```json
//! {
//!   "baseUrl": "http://127.0.0.1:8000",
//!   "locationBaseUrl": "https://nga-states-lga.onrender.com",
//!   "tokenDurationDays": 14,
//!   "requestTimeoutSecs": 0
//! }
//! ```
//! Keys this crate does not know about are kept as-is on save.

use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use crate::adapters::credentials::ACCESS_TOKEN_DURATION_DAYS;
use crate::adapters::http::{BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::adapters::location::DEFAULT_LOCATION_BASE_URL;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "PARTY_CURRENCY_DIR";

/// Environment variable supplying an access token for this process only
pub const TOKEN_ENV: &str = "PARTY_CURRENCY_TOKEN";

const SETTINGS_FILE: &str = "settings.json";

/// Accepted values for `tokenDurationDays`
pub const TOKEN_DURATION_DAYS_RANGE: RangeInclusive<i64> = 1..=3650;

/// Keys accepted by [`Config::set`]
pub const SETTING_KEYS: [&str; 4] = [
    "baseUrl",
    "locationBaseUrl",
    "tokenDurationDays",
    "requestTimeoutSecs",
];

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_duration_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: Map<String, JsonValue>,
}

/// Resolved client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub location_base_url: String,
    pub token_duration_days: i64,
    /// 0 means no timeout
    pub request_timeout_secs: u64,
    /// Token from `PARTY_CURRENCY_TOKEN`; never written to disk
    pub env_token: Option<String>,
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            location_base_url: DEFAULT_LOCATION_BASE_URL.to_string(),
            token_duration_days: ACCESS_TOKEN_DURATION_DAYS,
            request_timeout_secs: 0,
            env_token: None,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the data directory, then apply env overrides
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(data_dir)?;

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config.env_token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty());

        Ok(config)
    }

    /// Load settings.json only, ignoring the environment
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(&data_dir.join(SETTINGS_FILE))?;
        let defaults = Self::default();

        Ok(Self {
            base_url: raw.base_url.clone().unwrap_or(defaults.base_url),
            location_base_url: raw
                .location_base_url
                .clone()
                .unwrap_or(defaults.location_base_url),
            token_duration_days: match raw.token_duration_days {
                Some(days) if TOKEN_DURATION_DAYS_RANGE.contains(&days) => days,
                Some(days) => {
                    // Fall back so `config set` can still repair the file
                    warn!(days, "tokenDurationDays out of range, using the default");
                    defaults.token_duration_days
                }
                None => defaults.token_duration_days,
            },
            request_timeout_secs: raw.request_timeout_secs.unwrap_or(0),
            env_token: None,
            _raw_settings: raw,
        })
    }

    /// Save config to the data directory.
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let settings_path = data_dir.join(SETTINGS_FILE);

        let mut settings = read_settings(&settings_path)?;
        settings.base_url = Some(self.base_url.clone());
        settings.location_base_url = Some(self.location_base_url.clone());
        settings.token_duration_days = Some(self.token_duration_days);
        settings.request_timeout_secs = Some(self.request_timeout_secs);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Update one setting by its settings.json key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "baseUrl" => self.base_url = parse_url(value)?,
            "locationBaseUrl" => self.location_base_url = parse_url(value)?,
            "tokenDurationDays" => {
                let days: i64 = value
                    .parse()
                    .with_context(|| format!("Invalid number of days: {}", value))?;
                if !TOKEN_DURATION_DAYS_RANGE.contains(&days) {
                    bail!(
                        "tokenDurationDays must be between {} and {}",
                        TOKEN_DURATION_DAYS_RANGE.start(),
                        TOKEN_DURATION_DAYS_RANGE.end()
                    );
                }
                self.token_duration_days = days;
            }
            "requestTimeoutSecs" => {
                self.request_timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid number of seconds: {}", value))?;
            }
            _ => bail!(
                "Unknown setting '{}'. Valid keys: {}",
                key,
                SETTING_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Managed settings as JSON, for display
    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "baseUrl": self.base_url,
            "locationBaseUrl": self.location_base_url,
            "tokenDurationDays": self.token_duration_days,
            "requestTimeoutSecs": self.request_timeout_secs,
        })
    }
}

fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

fn parse_url(value: &str) -> Result<String> {
    let url = url::Url::parse(value).with_context(|| format!("Invalid URL: {}", value))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("URL must use http or https: {}", value);
    }
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load_file(dir.path()).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.location_base_url, "https://nga-states-lga.onrender.com");
        assert_eq!(config.token_duration_days, 14);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"baseUrl": "https://api.example.com", "theme": "dark"}"#,
        )
        .unwrap();

        let mut config = Config::load_file(dir.path()).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        config.set("requestTimeoutSecs", "30").unwrap();
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let value: JsonValue = serde_json::from_str(&content).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["requestTimeoutSecs"], 30);

        let reloaded = Config::load_file(dir.path()).unwrap();
        assert_eq!(reloaded.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("baseUrl", "ftp://example.com").is_err());
        assert!(config.set("tokenDurationDays", "0").is_err());
        assert!(config.set("tokenDurationDays", "3651").is_err());
        assert!(config.set("tokenDurationDays", "9223372036854775807").is_err());
        assert_eq!(config.token_duration_days, 14);
        config.set("tokenDurationDays", "3650").unwrap();
        assert!(config.set("colour", "blue").is_err());

        config.set("baseUrl", "https://api.example.com/").unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "not json").unwrap();
        let config = Config::load_file(dir.path()).unwrap();
        assert_eq!(config.token_duration_days, 14);
    }

    #[test]
    fn test_out_of_range_duration_in_file_uses_default() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"tokenDurationDays": 9223372036854775807, "requestTimeoutSecs": 5}"#,
        )
        .unwrap();

        let config = Config::load_file(dir.path()).unwrap();
        assert_eq!(config.token_duration_days, 14);
        assert_eq!(config.request_timeout_secs, 5);
    }
}
