//! Kconvert core - client data-access layer for the Kconvert currency
//! converter.
//!
//! Provides the reusable pieces a UI shell composes: an expiring
//! key/value cache, a single-flight bearer-token manager, a retrying
//! HTTP client, a deterministic fuzzy currency search, and the
//! conversion orchestrator tying them together.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain** (`domain`): error taxonomy, models, and the backend port
//! - **Services** (`services`): cache, token manager, search, metrics
//! - **Infrastructure** (`infrastructure`): reqwest client, retry
//!   policy, configuration loading, logging setup
//! - **Application** (`application`): the conversion orchestrator
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use kconvert::{ApiClient, ConfigLoader, CurrencyConverter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let client = Arc::new(ApiClient::new(&config.api)?);
//!     let converter = Arc::new(CurrencyConverter::new(client, &config));
//!
//!     let result = converter.convert("USD", "EUR", 100.0).await?;
//!     println!("{}", result.display());
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export the commonly used types at the crate root.
pub use application::CurrencyConverter;
pub use domain::errors::{ApiError, ApiResult};
pub use domain::models::{
    builtin_catalog, ApiConfig, CacheConfig, Config, Conversion, CurrencyRecord, FeatureFlags,
    ListedCurrency, LoggingConfig, RateSnapshot, Region,
};
pub use domain::ports::RatesApi;
pub use infrastructure::{ApiClient, ConfigError, ConfigLoader, RetryPolicy};
pub use services::{
    CacheStats, MetricsSnapshot, PerformanceMonitor, ScoredMatch, TokenManager, TtlCache,
};
