//! Cache key derivation.

use std::fmt;

use axum::http::Method;

/// Identity of a cacheable request: `METHOD:targetUrl`.
///
/// Only the method and the absolute target URL participate. Request bodies
/// and headers are ignored, so two POSTs with different payloads to the same
/// URL share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build a key from the inbound method and the resolved target URL.
    pub fn new(method: &Method, target_url: &str) -> Self {
        Self(format!("{}:{}", method.as_str(), target_url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
