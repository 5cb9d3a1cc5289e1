//! Concurrent TTL store for proxied responses.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::cache::entry::{CacheEntry, CachedResponse};
use crate::cache::key::CacheKey;
use crate::observability::metrics;

/// Default entry lifetime when none is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// A thread-safe response cache with a single global TTL.
///
/// Cloning is cheap and every clone shares the same entries, so the handle
/// can be captured by the request handler, the sweeper and tests alike.
#[derive(Debug, Clone)]
pub struct CacheStore {
    entries: Arc<DashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl CacheStore {
    /// Create an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up an unexpired response.
    ///
    /// An expired entry behaves as if it was never stored and is dropped on
    /// the way out.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CachedResponse>> {
        let now = Instant::now();
        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired_at(now) {
                return Some(entry.response.clone());
            }
        }

        // Re-check under the write lock: a concurrent set may have refreshed it.
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired_at(now))
            .is_some()
        {
            metrics::record_cache_eviction("expired", 1);
            metrics::record_cache_size(self.entries.len());
        }
        None
    }

    /// Store a response, replacing whatever was cached under `key`.
    pub fn set(&self, key: CacheKey, response: CachedResponse) -> Arc<CachedResponse> {
        let response = Arc::new(response);
        self.entries
            .insert(key, CacheEntry::new(response.clone(), self.ttl));
        metrics::record_cache_size(self.entries.len());
        response
    }

    /// Remove every entry. Returns how many were dropped.
    pub fn flush_all(&self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        metrics::record_cache_eviction("flush", removed);
        metrics::record_cache_size(0);
        removed
    }

    /// Remove every expired entry. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            metrics::record_cache_eviction("expired", removed);
            metrics::record_cache_size(self.entries.len());
        }
        removed
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
