//! HTTP client for the Kconvert backend.
//!
//! Wraps a pooled `reqwest::Client` with per-request timeouts and the
//! retry policy, and maps HTTP statuses onto the error taxonomy so the
//! layers above never look at raw status codes.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::config::ApiConfig;
use crate::domain::models::currency::{ListedCurrency, Region};
use crate::domain::models::rates::RateSnapshot;
use crate::domain::ports::RatesApi;

use super::retry::RetryPolicy;
use super::types::{AuthResponse, CurrenciesResponse, RatesResponse, RegionsResponse};

/// Backend HTTP client implementing [`RatesApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Build a client from API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
            retry: RetryPolicy::new(
                config.retry_attempts,
                config.retry_base_delay_ms,
                config.retry_max_delay_ms,
            ),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// GET with retry; each attempt is a fresh request with its own
    /// timeout. Bearer auth is attached when a token is given.
    async fn get(&self, url: &str, token: Option<&str>) -> ApiResult<Response> {
        self.retry
            .execute(|| {
                let mut request = self.http.get(url).timeout(self.timeout);
                if let Some(token) = token {
                    request = request.bearer_auth(token);
                }
                request.send()
            })
            .await
    }

    /// Map non-success statuses onto typed errors.
    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        match status {
            _ if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::TokenExpired),
            StatusCode::FORBIDDEN => Err(ApiError::InvalidToken),
            StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Http {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    /// Read and deserialize a body, surfacing schema violations.
    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::MalformedResponse(format!("unreadable body: {err}")))?;
        serde_json::from_str(&body).map_err(|err| ApiError::MalformedResponse(err.to_string()))
    }
}

#[async_trait]
impl RatesApi for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_token(&self) -> ApiResult<String> {
        let url = self.endpoint("auth");
        debug!(%url, "requesting bearer token");

        let response = self.get(&url, None).await?;
        if !response.status().is_success() {
            return Err(ApiError::Auth(format!(
                "auth endpoint returned {}",
                response.status()
            )));
        }

        let body: AuthResponse = Self::parse(response)
            .await
            .map_err(|err| ApiError::Auth(format!("invalid auth response: {err}")))?;
        body.into_token()
    }

    #[instrument(skip(self))]
    async fn fetch_currencies(&self) -> ApiResult<Vec<ListedCurrency>> {
        let url = self.endpoint("currencies");
        debug!(%url, "fetching currency listing");

        let response = Self::check_status(self.get(&url, None).await?).await?;
        let body: CurrenciesResponse = Self::parse(response).await?;
        body.into_listing()
    }

    #[instrument(skip(self))]
    async fn fetch_regions(&self) -> ApiResult<Vec<Region>> {
        let url = self.endpoint("regions");
        debug!(%url, "fetching regions");

        let response = Self::check_status(self.get(&url, None).await?).await?;
        let body: RegionsResponse = Self::parse(response).await?;
        Ok(body.into_regions())
    }

    #[instrument(skip(self, token))]
    async fn fetch_rates(&self, base: &str, token: &str) -> ApiResult<RateSnapshot> {
        let url = self.endpoint(&format!("rates/{base}"));
        debug!(%url, "fetching rates");

        let response = Self::check_status(self.get(&url, Some(token)).await?).await?;
        let body: RatesResponse = Self::parse(response).await?;
        body.into_snapshot(base)
    }
}
