//! Conversion orchestration.
//!
//! Composes the token manager, caches, and backend port into the
//! operations a UI shell consumes: convert an amount, list supported
//! currencies, search the catalog, swap or reset the selected pair.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::config::Config;
use crate::domain::models::conversion::{validate_amount, Conversion};
use crate::domain::models::currency::{
    builtin_catalog, country_for_code, CurrencyRecord, Region,
};
use crate::domain::models::rates::RateSnapshot;
use crate::domain::ports::RatesApi;
use crate::services::cache::TtlCache;
use crate::services::metrics::{MetricsSnapshot, PerformanceMonitor};
use crate::services::search::{search, ScoredMatch};
use crate::services::token::TokenManager;

/// Default selected source currency.
const DEFAULT_FROM: &str = "USD";

/// Default selected target currency.
const DEFAULT_TO: &str = "SGD";

/// Cache key for the fetched currency listing.
const CURRENCIES_KEY: &str = "supported_currencies";

/// Cache key for the fetched region groupings.
const REGIONS_KEY: &str = "currency_regions";

/// Shortened listing TTL used when serving the built-in fallback, so a
/// recovered backend is retried soon.
const FALLBACK_LISTING_TTL: Duration = Duration::from_secs(5 * 60);

fn rate_key(from: &str, to: &str) -> String {
    format!("rate_{from}_{to}")
}

/// The conversion orchestrator.
///
/// Construct one per process and share it via `Arc`; all state lives in
/// explicitly owned fields, not globals.
pub struct CurrencyConverter {
    api: Arc<dyn RatesApi>,
    tokens: TokenManager,
    rates: TtlCache<String, f64>,
    listings: TtlCache<String, Vec<CurrencyRecord>>,
    region_groups: TtlCache<String, Vec<Region>>,
    catalog: Vec<CurrencyRecord>,
    metrics: PerformanceMonitor,
    selection: Mutex<(String, String)>,
    rates_ttl: Duration,
    currencies_ttl: Duration,
    offline_fallback: bool,
    monitoring: bool,
}

impl CurrencyConverter {
    /// Wire an orchestrator from a backend port and configuration.
    pub fn new(api: Arc<dyn RatesApi>, config: &Config) -> Self {
        let tokens = TokenManager::new(
            api.clone(),
            Duration::from_millis(config.cache.token_ttl_ms),
        );

        Self {
            api,
            tokens,
            rates: TtlCache::new(),
            listings: TtlCache::new(),
            region_groups: TtlCache::new(),
            catalog: builtin_catalog(),
            metrics: PerformanceMonitor::new(),
            selection: Mutex::new((DEFAULT_FROM.to_string(), DEFAULT_TO.to_string())),
            rates_ttl: Duration::from_millis(config.cache.rates_ttl_ms),
            currencies_ttl: Duration::from_millis(config.cache.currencies_ttl_ms),
            offline_fallback: config.features.offline_fallback,
            monitoring: config.features.performance_monitoring,
        }
    }

    fn lock_selection(&self) -> MutexGuard<'_, (String, String)> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self, response_time_ms: u64, from_cache: bool) {
        if self.monitoring {
            self.metrics.record_api_call(response_time_ms, from_cache);
        }
    }

    fn record_error(&self) {
        if self.monitoring {
            self.metrics.record_error();
        }
    }

    /// Convert `amount` from one currency to another.
    ///
    /// Serves the rate from cache when fresh; otherwise authenticates
    /// and fetches. A 401 from the rates endpoint forces one token
    /// refresh and one retry of the request before the failure is
    /// surfaced as an auth error.
    pub async fn convert(&self, from: &str, to: &str, amount: f64) -> ApiResult<Conversion> {
        let amount = validate_amount(amount)?;

        let key = rate_key(from, to);
        if let Some(rate) = self.rates.get(&key) {
            debug!(%from, %to, rate, "serving cached rate");
            self.record_call(0, true);
            return Ok(Conversion::new(from, to, amount, rate));
        }

        let started = Instant::now();
        let snapshot = match self.fetch_rates_with_refresh(from).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.record_error();
                return Err(err);
            }
        };

        let rate = match snapshot.rate_for(to) {
            Some(rate) => rate,
            None => {
                self.record_error();
                return Err(ApiError::RateUnavailable(to.to_string()));
            }
        };

        self.rates.set(key, rate, self.rates_ttl);
        self.record_call(started.elapsed().as_millis() as u64, false);
        info!(%from, %to, rate, "exchange rate fetched");

        Ok(Conversion::new(from, to, amount, rate))
    }

    /// Convert using the currently selected pair.
    pub async fn convert_selected(&self, amount: f64) -> ApiResult<Conversion> {
        let (from, to) = self.selection();
        self.convert(&from, &to, amount).await
    }

    /// Fetch rates, handling the expired-token case once.
    async fn fetch_rates_with_refresh(&self, base: &str) -> ApiResult<RateSnapshot> {
        let token = self.tokens.valid_token().await?;
        match self.api.fetch_rates(base, &token).await {
            Err(ApiError::TokenExpired) => {
                debug!("rates request rejected with 401, forcing token refresh");
                self.tokens.clear();
                let token = self.tokens.valid_token().await?;
                self.api
                    .fetch_rates(base, &token)
                    .await
                    .map_err(|err| match err {
                        // A second 401 with a fresh token is terminal.
                        ApiError::TokenExpired => {
                            ApiError::Auth("token rejected after forced refresh".to_string())
                        }
                        other => other,
                    })
            }
            other => other,
        }
    }

    /// Fetch the supported-currency listing, cached for 24h.
    ///
    /// The currencies and regions endpoints are queried concurrently;
    /// regions are optional and cached on the side when available. When
    /// the listing cannot be fetched and offline fallback is enabled,
    /// the built-in catalog is served and cached briefly.
    pub async fn fetch_supported_currencies(&self) -> ApiResult<Vec<CurrencyRecord>> {
        if let Some(listing) = self.listings.get(CURRENCIES_KEY) {
            debug!(count = listing.len(), "serving cached currency listing");
            self.record_call(0, true);
            return Ok(listing);
        }

        let started = Instant::now();
        let (currencies, regions) = tokio::join!(
            self.api.fetch_currencies(),
            self.api.fetch_regions()
        );

        match currencies {
            Ok(listed) => {
                let records: Vec<CurrencyRecord> = listed
                    .into_iter()
                    .map(|currency| {
                        let country = country_for_code(&self.catalog, &currency.code);
                        CurrencyRecord {
                            code: currency.code,
                            name: currency.name,
                            country,
                        }
                    })
                    .collect();

                self.listings
                    .set(CURRENCIES_KEY.to_string(), records.clone(), self.currencies_ttl);

                match regions {
                    Ok(groups) => {
                        self.region_groups
                            .set(REGIONS_KEY.to_string(), groups, self.currencies_ttl);
                    }
                    Err(err) => warn!(error = %err, "regions fetch failed"),
                }

                self.record_call(started.elapsed().as_millis() as u64, false);
                info!(count = records.len(), "currency listing fetched");
                Ok(records)
            }
            Err(err) if self.offline_fallback => {
                warn!(error = %err, "currencies fetch failed, serving built-in catalog");
                self.record_error();
                let fallback = self.catalog.clone();
                self.listings
                    .set(CURRENCIES_KEY.to_string(), fallback.clone(), FALLBACK_LISTING_TTL);
                Ok(fallback)
            }
            Err(err) => {
                self.record_error();
                Err(err)
            }
        }
    }

    /// Cached region groupings, if a listing fetch has stored them.
    pub fn regions(&self) -> Option<Vec<Region>> {
        self.region_groups.get(REGIONS_KEY)
    }

    /// Rank the built-in catalog against a free-text query.
    pub fn search(&self, query: &str) -> Vec<ScoredMatch> {
        search(&self.catalog, query)
    }

    /// The currently selected (from, to) pair.
    pub fn selection(&self) -> (String, String) {
        self.lock_selection().clone()
    }

    /// Replace the selected pair.
    pub fn set_selection(&self, from: &str, to: &str) {
        let mut selection = self.lock_selection();
        *selection = (from.to_string(), to.to_string());
    }

    /// Swap the selected pair, returning the new (from, to).
    pub fn swap_currencies(&self) -> (String, String) {
        let mut selection = self.lock_selection();
        let selection = &mut *selection;
        std::mem::swap(&mut selection.0, &mut selection.1);
        selection.clone()
    }

    /// Full reset: default selection, empty caches, empty token state,
    /// zeroed counters.
    pub fn reset(&self) {
        {
            let mut selection = self.lock_selection();
            *selection = (DEFAULT_FROM.to_string(), DEFAULT_TO.to_string());
        }
        self.rates.clear();
        self.listings.clear();
        self.region_groups.clear();
        self.tokens.clear();
        self.metrics.reset();
        info!("converter state reset");
    }

    /// Current metrics reading.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
