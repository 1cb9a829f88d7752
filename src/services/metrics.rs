//! Request and cache counters for diagnostics.
//!
//! Counters are atomics so the monitor can be shared freely across
//! tasks; readings are diagnostics, not behavior-critical state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Aggregates api-call, cache, and error counts.
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    api_calls: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    errors: AtomicU64,
    total_response_time_ms: AtomicU64,
}

/// Point-in-time reading of the monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    /// Total lookups, cached and fresh.
    pub api_calls: u64,
    /// Lookups served from cache.
    pub cache_hits: u64,
    /// Lookups that went to the network.
    pub cache_misses: u64,
    /// Failed operations.
    pub errors: u64,
    /// Mean response time of network-served lookups.
    pub average_response_time_ms: f64,
    /// Percentage of lookups served from cache.
    pub cache_hit_rate: f64,
}

impl PerformanceMonitor {
    /// Create a monitor with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one lookup; `from_cache` lookups do not contribute to the
    /// response-time average.
    pub fn record_api_call(&self, response_time_ms: u64, from_cache: bool) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
        if from_cache {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
            self.total_response_time_ms
                .fetch_add(response_time_ms, Ordering::Relaxed);
        }
    }

    /// Record one failed operation.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let api_calls = self.api_calls.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let cache_misses = self.cache_misses.load(Ordering::Relaxed);
        let total_ms = self.total_response_time_ms.load(Ordering::Relaxed);

        MetricsSnapshot {
            api_calls,
            cache_hits,
            cache_misses,
            errors: self.errors.load(Ordering::Relaxed),
            average_response_time_ms: if cache_misses > 0 {
                total_ms as f64 / cache_misses as f64
            } else {
                0.0
            },
            cache_hit_rate: if api_calls > 0 {
                cache_hits as f64 / api_calls as f64 * 100.0
            } else {
                0.0
            },
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.api_calls.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
        self.total_response_time_ms.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_rate() {
        let monitor = PerformanceMonitor::new();
        monitor.record_api_call(0, true);
        monitor.record_api_call(100, false);
        monitor.record_api_call(0, true);
        monitor.record_api_call(300, false);

        let snapshot = monitor.snapshot();
        assert_eq!(snapshot.api_calls, 4);
        assert_eq!(snapshot.cache_hits, 2);
        assert_eq!(snapshot.cache_misses, 2);
        assert_eq!(snapshot.cache_hit_rate, 50.0);
        assert_eq!(snapshot.average_response_time_ms, 200.0);
    }

    #[test]
    fn test_empty_monitor_has_zero_rates() {
        let snapshot = PerformanceMonitor::new().snapshot();
        assert_eq!(snapshot.cache_hit_rate, 0.0);
        assert_eq!(snapshot.average_response_time_ms, 0.0);
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let monitor = PerformanceMonitor::new();
        monitor.record_api_call(50, false);
        monitor.record_error();
        monitor.reset();

        let snapshot = monitor.snapshot();
        assert_eq!(snapshot.api_calls, 0);
        assert_eq!(snapshot.errors, 0);
        assert_eq!(snapshot.average_response_time_ms, 0.0);
    }
}
