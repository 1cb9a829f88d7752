//! Infrastructure layer: HTTP client, configuration, logging.
//!
//! Implementations here satisfy the port traits defined in the domain
//! layer.

pub mod config;
pub mod http;
pub mod logging;

pub use config::{ConfigError, ConfigLoader};
pub use http::{ApiClient, RetryPolicy};
