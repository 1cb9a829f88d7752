//! Configuration model for the kconvert data-access layer.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cache lifetimes per data category.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Feature toggles.
    #[serde(default)]
    pub features: FeatureFlags,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Base URL of the backend, without the `/api` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Total attempts per request, including the first (1 = no retry).
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Initial backoff delay between attempts in milliseconds.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Backoff delay ceiling in milliseconds.
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_retry_attempts() -> u32 {
    3
}

const fn default_retry_base_delay_ms() -> u64 {
    1000
}

const fn default_retry_max_delay_ms() -> u64 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry_attempts: default_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

/// Cache lifetimes per data category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Exchange-rate cache lifetime in milliseconds.
    #[serde(default = "default_rates_ttl_ms")]
    pub rates_ttl_ms: u64,

    /// Currency-listing cache lifetime in milliseconds.
    #[serde(default = "default_currencies_ttl_ms")]
    pub currencies_ttl_ms: u64,

    /// Bearer-token lifetime in milliseconds. Kept shorter than the
    /// server-side expiry so a cached token is never sent stale.
    #[serde(default = "default_token_ttl_ms")]
    pub token_ttl_ms: u64,
}

const fn default_rates_ttl_ms() -> u64 {
    5 * 60 * 1000
}

const fn default_currencies_ttl_ms() -> u64 {
    24 * 60 * 60 * 1000
}

const fn default_token_ttl_ms() -> u64 {
    9 * 60 * 1000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            rates_ttl_ms: default_rates_ttl_ms(),
            currencies_ttl_ms: default_currencies_ttl_ms(),
            token_ttl_ms: default_token_ttl_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Feature toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeatureFlags {
    /// Record api-call/cache-hit counters.
    #[serde(default = "default_true")]
    pub performance_monitoring: bool,

    /// Serve the built-in catalog when the currency listing cannot be
    /// fetched.
    #[serde(default = "default_true")]
    pub offline_fallback: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            performance_monitoring: default_true(),
            offline_fallback: default_true(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.api.retry_attempts, 3);
        assert_eq!(config.cache.rates_ttl_ms, 300_000);
        assert_eq!(config.cache.currencies_ttl_ms, 86_400_000);
        assert_eq!(config.cache.token_ttl_ms, 540_000);
        assert!(config.features.offline_fallback);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config =
            serde_yaml::from_str("api:\n  base_url: https://rates.example.com\n")
                .expect("valid yaml");
        assert_eq!(config.api.base_url, "https://rates.example.com");
        assert_eq!(config.api.retry_attempts, 3);
        assert_eq!(config.logging.level, "info");
    }
}
