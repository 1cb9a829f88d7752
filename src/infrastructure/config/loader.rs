//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default project-local configuration file.
const CONFIG_FILE: &str = "kconvert.yaml";

/// Environment variable prefix; `KCONVERT_API__BASE_URL` maps onto
/// `api.base_url`.
const ENV_PREFIX: &str = "KCONVERT_";

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid timeout: {0} ms. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid retry_attempts: {0}. Must be at least 1")]
    InvalidRetryAttempts(u32),

    #[error(
        "Invalid backoff configuration: retry_base_delay_ms ({0}) must not exceed retry_max_delay_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid cache TTL: {name} must be positive")]
    InvalidCacheTtl { name: &'static str },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `kconvert.yaml` in the working directory (optional)
    /// 3. `KCONVERT_*` environment variables
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to extract configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, without env overrides.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate a loaded configuration.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.api.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if config.api.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(config.api.timeout_ms));
        }
        if config.api.retry_attempts == 0 {
            return Err(ConfigError::InvalidRetryAttempts(config.api.retry_attempts));
        }
        if config.api.retry_base_delay_ms > config.api.retry_max_delay_ms {
            return Err(ConfigError::InvalidBackoff(
                config.api.retry_base_delay_ms,
                config.api.retry_max_delay_ms,
            ));
        }

        for (name, value) in [
            ("cache.rates_ttl_ms", config.cache.rates_ttl_ms),
            ("cache.currencies_ttl_ms", config.cache.currencies_ttl_ms),
            ("cache.token_ttl_ms", config.cache.token_ttl_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidCacheTtl { name });
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
