//! Error taxonomy for the kconvert data-access layer.
//!
//! Every fallible operation returns [`ApiError`] so callers branch on the
//! error kind instead of parsing message strings. The enum owns plain
//! strings rather than underlying error types so it stays `Clone`: the
//! token manager fans a single refresh outcome out to every concurrent
//! waiter through a shared future, which requires a cloneable output.

use thiserror::Error;

/// Result alias used across the crate.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced by the HTTP client, token manager, and orchestrator.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Token endpoint unreachable, non-2xx, or returned no usable token.
    #[error("auth failed: {0}")]
    Auth(String),

    /// Every retry attempt of a request failed at the network level.
    #[error("network request failed after {attempts} attempts: {message}")]
    Network { attempts: u32, message: String },

    /// HTTP 429 from the backend. Terminal, surfaced verbatim.
    #[error("rate limit exceeded - too many requests")]
    RateLimited,

    /// HTTP 403 from the backend. Terminal, never triggers a refresh.
    #[error("invalid token - access denied")]
    InvalidToken,

    /// HTTP 401 from the rates endpoint. The orchestrator reacts by
    /// forcing one token refresh and retrying the request once.
    #[error("token expired")]
    TokenExpired,

    /// Backend responded successfully but the payload lacks a usable
    /// rate for the requested target currency.
    #[error("exchange rate not available for {0}")]
    RateUnavailable(String),

    /// Response body violated the expected schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Any other non-success HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    /// Conversion input rejected before any network activity.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl ApiError {
    /// Returns true for failures that may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Network { .. } | ApiError::TokenExpired)
    }

    /// Returns true for failures that must be surfaced as-is, with no
    /// automatic retry or refresh.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited
                | ApiError::InvalidToken
                | ApiError::RateUnavailable(_)
                | ApiError::InvalidAmount(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(ApiError::TokenExpired.is_transient());
        assert!(ApiError::Network {
            attempts: 3,
            message: "connection refused".to_string()
        }
        .is_transient());
    }

    #[test]
    fn test_terminal_errors() {
        assert!(ApiError::RateLimited.is_terminal());
        assert!(ApiError::InvalidToken.is_terminal());
        assert!(ApiError::RateUnavailable("EUR".to_string()).is_terminal());
    }

    #[test]
    fn test_classification_exclusivity() {
        let expired = ApiError::TokenExpired;
        assert!(expired.is_transient());
        assert!(!expired.is_terminal());

        let forbidden = ApiError::InvalidToken;
        assert!(!forbidden.is_transient());
        assert!(forbidden.is_terminal());
    }

    #[test]
    fn test_errors_are_cloneable() {
        let err = ApiError::Network {
            attempts: 2,
            message: "timed out".to_string(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
