//! Expiring key/value store used to memoize backend responses.
//!
//! Expiry is lazy: an entry past its deadline is removed by the next
//! `get` that touches it, never by a background task. Same-key
//! operations are serialized by the interior mutex so a read can never
//! observe a half-written entry.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Generic TTL cache.
///
/// Values are cloned out on `get`; callers treat them as snapshots.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

/// Point-in-time cache diagnostics.
#[derive(Debug, Clone)]
pub struct CacheStats<K> {
    /// Number of live entries, counting any not yet lazily expired.
    pub size: usize,
    /// Keys currently stored.
    pub keys: Vec<K>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value` under `key` for `ttl`, overwriting any existing
    /// entry unconditionally.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.lock().insert(key, entry);
    }

    /// Fetch a live value, removing the entry if it has expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if Instant::now() <= entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Remove an entry; no-op when absent.
    pub fn remove<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.lock().remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Current entry count and key list, for diagnostics only.
    pub fn stats(&self) -> CacheStats<K> {
        let entries = self.lock();
        CacheStats {
            size: entries.len(),
            keys: entries.keys().cloned().collect(),
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
