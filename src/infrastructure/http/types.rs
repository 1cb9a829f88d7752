//! Wire formats for the Kconvert backend, validated at the boundary.
//!
//! Deserialization is deliberately lenient (optional fields, defaults)
//! and the `into_*` conversions enforce the contract, so a missing or
//! empty field becomes a typed error instead of an undefined value
//! propagating through the crate.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::currency::{ListedCurrency, Region};
use crate::domain::models::rates::RateSnapshot;

/// Body of `GET /api/auth`.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
}

impl AuthResponse {
    /// Extract the token, requiring it to be present and non-empty.
    pub fn into_token(self) -> ApiResult<String> {
        match self.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ApiError::Auth("no token in auth response".to_string())),
        }
    }
}

/// Body of `GET /api/currencies`.
#[derive(Debug, Deserialize)]
pub struct CurrenciesResponse {
    #[serde(default)]
    currencies: Vec<ListedCurrency>,
}

impl CurrenciesResponse {
    /// Validate and extract the listing.
    pub fn into_listing(self) -> ApiResult<Vec<ListedCurrency>> {
        if self.currencies.is_empty() {
            return Err(ApiError::MalformedResponse(
                "empty currency list".to_string(),
            ));
        }
        if let Some(bad) = self
            .currencies
            .iter()
            .find(|c| c.code.is_empty() || c.name.is_empty())
        {
            return Err(ApiError::MalformedResponse(format!(
                "currency entry with empty field: {bad:?}"
            )));
        }
        Ok(self.currencies)
    }
}

/// Body of `GET /api/regions`.
#[derive(Debug, Deserialize)]
pub struct RegionsResponse {
    #[serde(default)]
    regions: Vec<Region>,
}

impl RegionsResponse {
    /// Extract the region groupings.
    pub fn into_regions(self) -> Vec<Region> {
        self.regions
    }
}

/// Body of `GET /api/rates/{base}`.
#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
}

impl RatesResponse {
    /// Validate and convert into a [`RateSnapshot`].
    ///
    /// An explicit `error` field or a missing/empty rate table is a
    /// malformed response even under HTTP 200.
    pub fn into_snapshot(self, base: &str) -> ApiResult<RateSnapshot> {
        if let Some(message) = self.error {
            return Err(ApiError::MalformedResponse(message));
        }
        if self.conversion_rates.is_empty() {
            return Err(ApiError::MalformedResponse(
                "missing conversion rates".to_string(),
            ));
        }
        Ok(RateSnapshot::new(base, self.conversion_rates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_with_token() {
        let body: AuthResponse = serde_json::from_str(r#"{"token": "abc123"}"#).expect("json");
        assert_eq!(body.into_token().expect("token"), "abc123");
    }

    #[test]
    fn test_auth_response_missing_or_empty_token() {
        let missing: AuthResponse = serde_json::from_str(r#"{}"#).expect("json");
        assert!(matches!(missing.into_token(), Err(ApiError::Auth(_))));

        let empty: AuthResponse = serde_json::from_str(r#"{"token": ""}"#).expect("json");
        assert!(matches!(empty.into_token(), Err(ApiError::Auth(_))));
    }

    #[test]
    fn test_currencies_response_listing() {
        let body: CurrenciesResponse = serde_json::from_str(
            r#"{"currencies": [{"code": "USD", "name": "US Dollar"}], "count": 1}"#,
        )
        .expect("json");
        let listing = body.into_listing().expect("listing");
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].code, "USD");
    }

    #[test]
    fn test_currencies_response_rejects_empty_list() {
        let body: CurrenciesResponse = serde_json::from_str(r#"{"currencies": []}"#).expect("json");
        assert!(matches!(
            body.into_listing(),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_currencies_response_rejects_blank_fields() {
        let body: CurrenciesResponse =
            serde_json::from_str(r#"{"currencies": [{"code": "", "name": "Mystery"}]}"#)
                .expect("json");
        assert!(matches!(
            body.into_listing(),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_rates_response_snapshot() {
        let body: RatesResponse = serde_json::from_str(
            r#"{"success": true, "conversion_rates": {"EUR": 0.92, "GBP": 0.79}}"#,
        )
        .expect("json");
        let snapshot = body.into_snapshot("USD").expect("snapshot");
        assert_eq!(snapshot.base, "USD");
        assert_eq!(snapshot.rate_for("EUR"), Some(0.92));
    }

    #[test]
    fn test_rates_response_error_field() {
        let body: RatesResponse =
            serde_json::from_str(r#"{"error": "unsupported base"}"#).expect("json");
        match body.into_snapshot("XXX") {
            Err(ApiError::MalformedResponse(message)) => {
                assert_eq!(message, "unsupported base");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_rates_response_missing_table() {
        let body: RatesResponse = serde_json::from_str(r#"{"success": true}"#).expect("json");
        assert!(matches!(
            body.into_snapshot("USD"),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_regions_response() {
        let body: RegionsResponse = serde_json::from_str(
            r#"{"regions": [{"name": "Europe", "currencies": ["EUR", "GBP"]}], "count": 1}"#,
        )
        .expect("json");
        let regions = body.into_regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].currencies, vec!["EUR", "GBP"]);
    }
}
