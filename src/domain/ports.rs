//! Port traits implemented by the infrastructure layer.

use async_trait::async_trait;

use crate::domain::errors::ApiResult;
use crate::domain::models::currency::{ListedCurrency, Region};
use crate::domain::models::rates::RateSnapshot;

/// Access to the currency backend.
///
/// Implementations are responsible for transport-level retry and for
/// mapping HTTP statuses onto the [`crate::domain::errors::ApiError`]
/// taxonomy. Consumers hold an `Arc<dyn RatesApi>` so tests can swap in
/// an in-memory double.
#[async_trait]
pub trait RatesApi: Send + Sync {
    /// Obtain a fresh bearer token from the auth endpoint.
    async fn fetch_token(&self) -> ApiResult<String>;

    /// List the currencies the backend supports.
    async fn fetch_currencies(&self) -> ApiResult<Vec<ListedCurrency>>;

    /// List geographic currency groupings.
    async fn fetch_regions(&self) -> ApiResult<Vec<Region>>;

    /// Fetch conversion rates for a base currency.
    ///
    /// `token` is sent as a bearer credential; 401/403/429 map to
    /// `TokenExpired`/`InvalidToken`/`RateLimited` respectively.
    async fn fetch_rates(&self, base: &str, token: &str) -> ApiResult<RateSnapshot>;
}
