//! Logging setup for host applications.
//!
//! The library itself only emits `tracing` events; a hosting
//! application calls [`init`] once at startup to install a subscriber
//! matching its configuration.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::domain::models::config::LoggingConfig;

/// Install a global subscriber from logging configuration.
///
/// `RUST_LOG` still takes precedence over the configured level, in the
/// usual `EnvFilter` fashion. Returns an error if a subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| anyhow!("invalid log level: {}", config.level))?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .map_err(|err| anyhow!("failed to install subscriber: {err}")),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .map_err(|err| anyhow!("failed to install subscriber: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_rejected() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            format: "pretty".to_string(),
        };
        assert!(init(&config).is_err());
    }
}
