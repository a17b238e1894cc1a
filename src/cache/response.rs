//! Response cache for API calls.
//!
//! [`ResponseCache`] maps a request key (the resolved URL without the API
//! key) to the last successful [`Response`] for it. It is an LRU store with
//! a fixed number of slots; it does not expire anything on its own.
//!
//! # TTL
//!
//! Freshness is the reader's call. [`ResponseCache::get`] returns whatever
//! is stored; [`ResponseCache::get_fresh`], used by the
//! [`Dispatcher`](crate::dispatch::Dispatcher), checks
//! [`Response::is_stale`] against [`CacheConfig::ttl`] and treats a stale
//! entry as a miss. The next successful call overwrites it.
//! Keeping the two concerns apart lets each be tested on its own.
//!
//! # Sizing
//!
//! By default the capacity equals the rolling-window request limit: the
//! cache never needs more slots than requests the client may legally make
//! while an entry is still fresh.
//!
//! # Locking
//!
//! The store sits behind a `std::sync::Mutex` that is only held for the
//! duration of a single operation and never across an `.await`, so cache
//! hits never queue behind the rate limiter.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::trace;

use super::lru::LruStore;
use crate::telemetry;
use crate::types::Response;

/// Default time-to-live: 10 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Configuration for the response cache.
///
/// ```rust
/// # use riftgate::cache::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .capacity(1_000)
///     .ttl(Duration::from_secs(60));
/// assert!(config.enabled);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether responses are cached at all. Default: true.
    pub enabled: bool,
    /// Number of slots. Default: `None`, meaning the rolling-window limit.
    pub capacity: Option<usize>,
    /// Age at which a cached response is stale. Default: 10 minutes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: None,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with caching turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the number of slots.
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = Some(n);
        self
    }

    /// Set the time-to-live for cached responses.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// In-memory LRU response cache. See module docs.
pub struct ResponseCache {
    store: Mutex<LruStore<String, Arc<Response>>>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: Mutex::new(LruStore::new(capacity)),
        }
    }

    fn store(&self) -> MutexGuard<'_, LruStore<String, Arc<Response>>> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up a response and promote it to most recently used.
    ///
    /// Returns stale entries too; see the module docs on TTL.
    pub fn get(&self, key: &str) -> Option<Arc<Response>> {
        let hit = self.store().get(key).cloned();
        match hit {
            Some(_) => metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1),
            None => metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1),
        }
        hit
    }

    /// Look up a response younger than `ttl`.
    ///
    /// A stale entry is promoted but reported as a miss (and counted in
    /// `riftgate_cache_stale_total`); it stays cached until overwritten.
    pub fn get_fresh(&self, key: &str, ttl: Duration) -> Option<Arc<Response>> {
        let hit = self.store().get(key).cloned();
        match hit {
            Some(response) if !response.is_stale(ttl) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(response)
            }
            Some(stale) => {
                trace!(%key, age_ms = stale.age().as_millis() as u64, "stale cached response");
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                metrics::counter!(telemetry::CACHE_STALE_TOTAL).increment(1);
                None
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Insert a response as most recently used, evicting beyond capacity.
    pub fn put(&self, key: impl Into<String>, response: Arc<Response>) {
        let evicted = self.store().put(key.into(), response);
        for (key, _) in evicted {
            trace!(%key, "evicted cached response");
        }
    }

    /// Whether `key` is cached, without promoting it.
    pub fn contains(&self, key: &str) -> bool {
        self.store().peek(key).is_some()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.store().clear();
    }

    /// Change the number of slots, evicting least recently used entries now.
    pub fn set_capacity(&self, capacity: usize) {
        let evicted = self.store().set_capacity(capacity);
        trace!(capacity, evicted = evicted.len(), "cache resized");
    }

    pub fn capacity(&self) -> usize {
        self.store().capacity()
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store();
        f.debug_struct("ResponseCache")
            .field("len", &store.len())
            .field("capacity", &store.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(n: u64) -> Arc<Response> {
        Arc::new(Response::new(json!({ "n": n }), 200))
    }

    #[test]
    fn cache_config_defaults() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.capacity, None);
        assert_eq!(config.ttl, Duration::from_secs(600));
    }

    #[test]
    fn disabled_config() {
        assert!(!CacheConfig::disabled().enabled);
    }

    #[test]
    fn get_returns_same_allocation() {
        let cache = ResponseCache::new(4);
        let r = response(1);
        cache.put("k", r.clone());
        assert!(Arc::ptr_eq(&cache.get("k").unwrap(), &r));
    }

    #[test]
    fn debug_does_not_deadlock() {
        let cache = ResponseCache::new(2);
        cache.put("a", response(1));
        let rendered = format!("{cache:?}");
        assert!(rendered.contains("len: 1"));
    }
}
