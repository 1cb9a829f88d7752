//! Exponential-backoff retry for network-level failures.
//!
//! Only transport faults (connection refused, timeout, aborted request)
//! are retried. A response that arrives with a 4xx/5xx status is a
//! success at this layer and is handed back untouched; status handling
//! belongs to the client.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::errors::{ApiError, ApiResult};

/// Retry policy with a 1-based attempt ceiling.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first. 1 means no retry.
    max_attempts: u32,
    /// Initial backoff delay in milliseconds.
    base_delay_ms: u64,
    /// Backoff delay ceiling in milliseconds.
    max_delay_ms: u64,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Run `operation` until it succeeds or the attempt budget is spent.
    ///
    /// The operation is a factory so each attempt issues a fresh
    /// request. Exhaustion yields [`ApiError::Network`] carrying the
    /// attempt count and the final underlying failure.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, reqwest::Error>>,
    {
        let mut attempt: u32 = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if attempt >= self.max_attempts => {
                    warn!(attempts = attempt, error = %err, "retry budget exhausted");
                    return Err(ApiError::Network {
                        attempts: attempt,
                        message: err.to_string(),
                    });
                }
                Err(err) => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, backing off"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Delay before the attempt following `attempt` (1-based):
    /// `min(base * 2^(attempt-1), max)`.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponential = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt - 1));
        Duration::from_millis(exponential.min(self.max_delay_ms))
    }
}
