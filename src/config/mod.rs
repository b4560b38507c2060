//! Explicitly injected configuration. There are no ambient singletons: call
//! sites construct an [`AppConfig`] (or load one from a file) and pass it to
//! the services and backends that need it.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::RevenueError;
use crate::storage::RetryPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrySettings {
    #[serde(default = "RetrySettings::default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "RetrySettings::default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "RetrySettings::default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl RetrySettings {
    fn default_max_attempts() -> u32 {
        3
    }

    fn default_base_delay_ms() -> u64 {
        200
    }

    fn default_max_delay_ms() -> u64 {
        5_000
    }

    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: Self::default_max_attempts(),
            base_delay_ms: Self::default_base_delay_ms(),
            max_delay_ms: Self::default_max_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root under which each table is exposed, e.g. `https://host/rest/v1`.
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Rows fetched per page. The source capped reads around 500 rows; here
    /// the boundary is explicit.
    #[serde(default = "StoreConfig::default_page_size")]
    pub page_size: usize,
    #[serde(default = "StoreConfig::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub retry: RetrySettings,
}

impl StoreConfig {
    fn default_page_size() -> usize {
        500
    }

    fn default_request_timeout_ms() -> u64 {
        10_000
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            page_size: Self::default_page_size(),
            request_timeout_ms: Self::default_request_timeout_ms(),
            retry: RetrySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn new(store: StoreConfig) -> Self {
        Self { store }
    }

    pub fn load(path: &Path) -> Result<Self, RevenueError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), RevenueError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = StoreConfig::new("https://store.example/rest/v1");
        assert_eq!(config.page_size, 500);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"base_url": "https://store.example/rest/v1"}"#)
                .expect("partial config parses");
        assert_eq!(config.page_size, 500);
        assert_eq!(config.retry, RetrySettings::default());
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        let config = AppConfig::new(StoreConfig::new("https://store.example/rest/v1"));
        config.save(&path).expect("save succeeds");
        let loaded = AppConfig::load(&path).expect("load succeeds");
        assert_eq!(loaded, config);
    }
}
