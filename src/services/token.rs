//! Bearer-token acquisition with single-flight refresh.
//!
//! At most one refresh network call is in flight at any time. Callers
//! that arrive while a refresh is running await the same shared future
//! and observe the same resolved token or the same error as the
//! initiator. A failed refresh leaves the manager empty, so the next
//! caller starts over.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::errors::ApiResult;
use crate::domain::ports::RatesApi;

type SharedRefresh = Shared<BoxFuture<'static, ApiResult<String>>>;

#[derive(Default)]
struct TokenState {
    token: Option<String>,
    expires_at: Option<Instant>,
    in_flight: Option<SharedRefresh>,
}

/// Caching bearer-token source for authenticated backend calls.
#[derive(Clone)]
pub struct TokenManager {
    api: Arc<dyn RatesApi>,
    ttl: Duration,
    state: Arc<Mutex<TokenState>>,
}

impl TokenManager {
    /// Create a manager that refreshes through `api` and considers a
    /// token stale after `ttl`.
    pub fn new(api: Arc<dyn RatesApi>, ttl: Duration) -> Self {
        Self {
            api,
            ttl,
            state: Arc::new(Mutex::new(TokenState::default())),
        }
    }

    fn lock(state: &Mutex<TokenState>) -> MutexGuard<'_, TokenState> {
        state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a token is cached and not yet expired.
    pub fn is_token_valid(&self) -> bool {
        let state = Self::lock(&self.state);
        matches!(
            (&state.token, state.expires_at),
            (Some(_), Some(expires_at)) if Instant::now() < expires_at
        )
    }

    /// Return the cached token, or refresh it.
    ///
    /// The lock is only held to inspect state and install the shared
    /// refresh handle, never across an await point. Whoever finds no
    /// handle installed becomes the initiator; everyone else clones the
    /// handle and awaits the same outcome.
    pub async fn valid_token(&self) -> ApiResult<String> {
        let refresh = {
            let mut state = Self::lock(&self.state);

            if let (Some(token), Some(expires_at)) = (&state.token, state.expires_at) {
                if Instant::now() < expires_at {
                    return Ok(token.clone());
                }
            }

            if let Some(in_flight) = state.in_flight.clone() {
                in_flight
            } else {
                let fut = Self::refresh(self.api.clone(), self.state.clone(), self.ttl)
                    .boxed()
                    .shared();
                state.in_flight = Some(fut.clone());
                fut
            }
        };

        refresh.await
    }

    /// Reset to the empty state: token, expiry, and any in-flight
    /// handle are all dropped.
    pub fn clear(&self) {
        let mut state = Self::lock(&self.state);
        *state = TokenState::default();
        debug!("token state cleared");
    }

    /// The single refresh body. Runs exactly once per installed handle;
    /// clears the handle when it settles so later calls can start a
    /// fresh refresh.
    async fn refresh(
        api: Arc<dyn RatesApi>,
        state: Arc<Mutex<TokenState>>,
        ttl: Duration,
    ) -> ApiResult<String> {
        let result = api.fetch_token().await;

        let mut state = Self::lock(&state);
        state.in_flight = None;
        match result {
            Ok(token) => {
                state.token = Some(token.clone());
                state.expires_at = Some(Instant::now() + ttl);
                debug!(ttl_secs = ttl.as_secs(), "bearer token refreshed");
                Ok(token)
            }
            Err(err) => {
                // A failed refresh never leaves a stale token behind.
                state.token = None;
                state.expires_at = None;
                warn!(error = %err, "token refresh failed");
                Err(err)
            }
        }
    }
}
