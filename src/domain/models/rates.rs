//! Exchange-rate snapshots returned by the rates endpoint.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conversion rates for one base currency at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Base currency code the rates are quoted against.
    pub base: String,
    /// Target currency code to conversion rate.
    pub rates: HashMap<String, f64>,
    /// When the snapshot was received.
    pub fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(base: &str, rates: HashMap<String, f64>) -> Self {
        Self {
            base: base.to_string(),
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// Look up a usable rate for a target code.
    ///
    /// Non-finite and non-positive rates are treated as absent.
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        self.rates
            .get(code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(code: &str, rate: f64) -> RateSnapshot {
        RateSnapshot::new("USD", HashMap::from([(code.to_string(), rate)]))
    }

    #[test]
    fn test_rate_for_present_code() {
        let snapshot = snapshot_with("EUR", 0.92);
        assert_eq!(snapshot.rate_for("EUR"), Some(0.92));
        assert_eq!(snapshot.rate_for("GBP"), None);
    }

    #[test]
    fn test_rate_for_rejects_unusable_rates() {
        assert_eq!(snapshot_with("EUR", 0.0).rate_for("EUR"), None);
        assert_eq!(snapshot_with("EUR", -1.0).rate_for("EUR"), None);
        assert_eq!(snapshot_with("EUR", f64::NAN).rate_for("EUR"), None);
    }
}
