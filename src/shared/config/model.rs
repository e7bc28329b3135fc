use serde::Deserialize;
use std::time::Duration;

use crate::shared::datetime::time::TimeConfig;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub rollup: RollupConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub time: Option<TimeConfig>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

/// Raw rollup settings as written in the config file. Validation happens when
/// a `RollupSchema` is built from it.
#[derive(Debug, Clone, Deserialize)]
pub struct RollupConfig {
    #[serde(default = "default_granularity")]
    pub granularity: String,
    pub key_fields: Vec<String>,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default)]
    pub calculations: Vec<FieldSpecConfig>,
    #[serde(default)]
    pub unique_fields: Vec<FieldSpecConfig>,
}

/// A tracked event field and the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSpecConfig {
    pub field: String,
    /// Defaults to `field` when omitted
    pub output: Option<String>,
}

impl FieldSpecConfig {
    pub fn new(field: &str, output: &str) -> Self {
        Self {
            field: field.to_string(),
            output: Some(output.to_string()),
        }
    }

    pub fn output_name(&self) -> &str {
        self.output.as_deref().unwrap_or(&self.field)
    }
}

fn default_granularity() -> String {
    "day".to_string()
}

fn default_window_size() -> usize {
    500
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Upper bound for a single storage call
    #[serde(default = "default_storage_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            timeout: default_storage_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

fn default_storage_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Compare-and-retry settings for stores without an atomic merge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay", with = "humantime_serde")]
    pub base_delay: Duration,
    #[serde(default = "default_max_delay", with = "humantime_serde")]
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay: default_base_delay(),
            max_delay: default_max_delay(),
        }
    }
}

impl RetryConfig {
    /// Exponential backoff for the given zero-based attempt, capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay() -> Duration {
    Duration::from_millis(10)
}

fn default_max_delay() -> Duration {
    Duration::from_millis(200)
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("SNEL_ROLLUP_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
