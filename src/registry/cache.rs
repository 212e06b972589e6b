//! In-memory response cache with time-based expiry.
//!
//! The registry client keeps validated response bodies here so repeated tool
//! calls within the TTL window do not hit the network again. Entries expire
//! lazily: an expired entry simply reads as absent, it is never purged. The
//! key universe is the fixed set of component names plus the index, so
//! unbounded growth is not a concern in practice.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

/// Default time-to-live for cached registry responses (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// A cached value with the time it was stored.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// A TTL-expiring map from cache key to JSON response body.
///
/// Interior mutability via a `Mutex` so the registry client can take `&self`.
/// The get/insert pair is deliberately not atomic: two concurrent misses for
/// the same key may both fetch and both overwrite, which is benign because
/// registry GETs are idempotent.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the configured TTL.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value for `key` if it is still fresh.
    ///
    /// An expired entry is indistinguishable from a missing one.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    /// Stores `value` under `key`, overwriting any previous entry and
    /// stamping the current time.
    pub fn insert(&self, key: &str, value: Value) {
        self.insert_at(key, value, Instant::now());
    }

    /// Freshness check against an explicit `now`, so tests can control time.
    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<Value> {
        let entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry = entries.get(key)?;
        if now.duration_since(entry.stored_at) < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Insertion with an explicit storage time, for tests.
    pub(crate) fn insert_at(&self, key: &str, value: Value, stored_at: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_string(), CacheEntry { value, stored_at });
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
