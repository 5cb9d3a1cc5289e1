//! Cached response records and their expiry metadata.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};

/// One upstream response, exactly as the origin sent it.
///
/// Headers are stored unfiltered; hop-by-hop stripping happens when the
/// response is replayed to a client.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CachedResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self { status, headers, body }
    }
}

/// A stored response plus the instant it was written.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub response: Arc<CachedResponse>,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(response: Arc<CachedResponse>, ttl: Duration) -> Self {
        Self {
            response,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Whether the entry has outlived its TTL at `now`.
    ///
    /// An entry whose age equals the TTL is already expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}
