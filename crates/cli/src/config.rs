//! TOML configuration for a recruitment run.
//!
//! Missing sections fall back to their defaults; `validate` then rejects
//! anything a run cannot do without. Validation happens before any
//! network call is made.

use pipeline::rate::DEFAULT_REQUESTS_PER_WINDOW;
use pipeline::{FailurePolicy, RateBudget, RateError};
use recruiter::TelegramSource;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use store::{DEFAULT_STORE_FILE, normalize_name};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const LOG_LEVELS: [&str; 4] = ["debug", "info", "warn", "error"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file")]
    Parse(#[from] toml::de::Error),

    #[error("{0} not set")]
    Missing(&'static str),

    #[error(transparent)]
    Rate(#[from] RateError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Eurocore template id; takes precedence over the explicit fields
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EurocoreConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub active: bool,
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Keep failed checks out of the store so the next run retries them
    #[serde(default)]
    pub retry_failures: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            active: false,
            path: default_store_path(),
            retry_failures: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_rate() -> i64 {
    DEFAULT_REQUESTS_PER_WINDOW
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Sent as the NationStates User-Agent
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub region: String,
    /// Requests per 30 second window
    #[serde(default = "default_request_rate")]
    pub request_rate: i64,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub eurocore: EurocoreConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Values given on the command line, applied over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub region: Option<String>,
    pub request_rate: Option<i64>,
    pub cache: Option<bool>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(region) = overrides.region {
            self.region = region;
        }
        if let Some(rate) = overrides.request_rate {
            self.request_rate = rate;
        }
        if let Some(active) = overrides.cache {
            self.cache.active = active;
        }
        if let Some(level) = overrides.log_level {
            self.log.level = level;
        }
    }

    /// Check required fields and normalize the rest in place.
    pub fn validate(&mut self) -> Result<()> {
        if self.user.trim().is_empty() {
            return Err(ConfigError::Missing("user"));
        }
        if self.region.trim().is_empty() {
            return Err(ConfigError::Missing("region"));
        }
        self.region = normalize_name(&self.region);

        self.rate_budget()?;
        self.telegram_source()?;

        if self.eurocore.url.trim().is_empty() {
            return Err(ConfigError::Missing("eurocore url"));
        }
        if self.eurocore.username.is_empty() {
            return Err(ConfigError::Missing("eurocore username"));
        }
        if self.eurocore.password.is_empty() {
            return Err(ConfigError::Missing("eurocore password"));
        }
        self.eurocore.url = self.eurocore.url.trim().trim_end_matches('/').to_string();

        let level = self.log.level.trim().to_lowercase();
        self.log.level = if LOG_LEVELS.contains(&level.as_str()) {
            level
        } else {
            default_log_level()
        };

        Ok(())
    }

    pub fn rate_budget(&self) -> Result<RateBudget> {
        Ok(RateBudget::per_window(self.request_rate)?)
    }

    pub fn telegram_source(&self) -> Result<TelegramSource> {
        let telegram = &self.telegram;
        if let Some(template) = non_empty(telegram.template.as_deref()) {
            return Ok(TelegramSource::Template(template.to_string()));
        }

        let id = telegram
            .id
            .filter(|id| *id != 0)
            .ok_or(ConfigError::Missing("telegram id"))?;
        let key = non_empty(telegram.key.as_deref()).ok_or(ConfigError::Missing("telegram key"))?;
        let author =
            non_empty(telegram.author.as_deref()).ok_or(ConfigError::Missing("telegram author"))?;

        Ok(TelegramSource::Explicit {
            author: author.to_string(),
            id,
            key: key.to_string(),
        })
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.cache.retry_failures {
            FailurePolicy::Retry
        } else {
            FailurePolicy::Exclude
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const FULL: &str = r#"
user = "Testlandia"
region = "The Europeian Republic"
request_rate = 45

[telegram]
id = 12345
key = "abcdef"
author = "The Europeian Government"

[eurocore]
url = "https://eurocore.example/"
username = "bot"
password = "hunter2"

[cache]
active = true
path = "cache/exclusions.txt"

[log]
level = "DEBUG"
"#;

    fn valid() -> Config {
        let mut config = Config::parse(FULL).unwrap();
        config.validate().unwrap();
        config
    }

    #[test]
    fn test_full_config_is_normalized() {
        let config = valid();

        assert_eq!(config.region, "the_europeian_republic");
        assert_eq!(config.eurocore.url, "https://eurocore.example");
        assert_eq!(config.log.level, "debug");
        assert!(config.cache.active);
        assert_eq!(config.cache.path, PathBuf::from("cache/exclusions.txt"));
        assert_eq!(
            config.telegram_source().unwrap(),
            TelegramSource::Explicit {
                author: "The Europeian Government".to_string(),
                id: 12345,
                key: "abcdef".to_string(),
            }
        );
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let mut config = Config::parse(
            r#"
user = "Testlandia"
region = "testregionia"

[telegram]
template = "%TEMPLATE-1%"

[eurocore]
url = "https://eurocore.example"
username = "bot"
password = "hunter2"
"#,
        )
        .unwrap();
        config.validate().unwrap();

        assert_eq!(config.request_rate, 30);
        assert_eq!(config.rate_budget().unwrap().delay(), Duration::from_secs(1));
        assert!(!config.cache.active);
        assert_eq!(config.cache.path, PathBuf::from("exclusions.txt"));
        assert_eq!(config.failure_policy(), FailurePolicy::Exclude);
        assert_eq!(config.log.level, "info");
        assert_eq!(
            config.telegram_source().unwrap(),
            TelegramSource::Template("%TEMPLATE-1%".to_string())
        );
    }

    #[test]
    fn test_rate_out_of_range_is_rejected() {
        for rate in [0, -5, 46] {
            let mut config = Config::parse(FULL).unwrap();
            config.request_rate = rate;
            assert!(matches!(config.validate(), Err(ConfigError::Rate(_))));
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let mut config = Config::parse(FULL).unwrap();
        config.user = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Missing("user"))));

        let mut config = Config::parse(FULL).unwrap();
        config.telegram.key = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("telegram key"))
        ));

        let mut config = Config::parse(FULL).unwrap();
        config.eurocore.password = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("eurocore password"))
        ));
    }

    #[test]
    fn test_invalid_log_level_falls_back_to_info() {
        let mut config = Config::parse(FULL).unwrap();
        config.log.level = "verbose".to_string();
        config.validate().unwrap();
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = Config::parse(FULL).unwrap();
        config.apply_overrides(Overrides {
            region: Some("Lazarus".to_string()),
            request_rate: Some(10),
            cache: Some(false),
            log_level: None,
        });
        config.validate().unwrap();

        assert_eq!(config.region, "lazarus");
        assert_eq!(config.request_rate, 10);
        assert!(!config.cache.active);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_retry_failures_selects_retry_policy() {
        let mut config = Config::parse(&FULL.replace("[cache]\n", "[cache]\nretry_failures = true\n")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.failure_policy(), FailurePolicy::Retry);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(
            err.to_string(),
            format!("Failed to read config file {}", path.display())
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, FULL).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.user, "Testlandia");
    }
}
