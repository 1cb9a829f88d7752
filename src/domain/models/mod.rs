//! Domain models: currencies, conversions, rates, configuration.

pub mod config;
pub mod conversion;
pub mod currency;
pub mod rates;

pub use config::{ApiConfig, CacheConfig, Config, FeatureFlags, LoggingConfig};
pub use conversion::{format_amount, validate_amount, Conversion, MAX_AMOUNT};
pub use currency::{
    builtin_catalog, country_for_code, fallback_flag_url, flag_url, CurrencyRecord,
    ListedCurrency, Region,
};
pub use rates::RateSnapshot;
