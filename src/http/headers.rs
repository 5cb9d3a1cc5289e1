//! Header rules shared by the forward and replay paths.

use axum::http::header::{CONNECTION, HOST, TRANSFER_ENCODING};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Marker header telling clients whether the cache answered.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Request correlation header, assigned at ingress when absent.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Origin response headers never relayed to clients.
///
/// The proxy re-frames every body it sends, so the origin's framing and
/// connection management headers would describe the wrong message.
const STRIPPED_RESPONSE_HEADERS: [HeaderName; 2] = [TRANSFER_ENCODING, CONNECTION];

/// Whether the cache answered a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }

    /// Lowercase label for metrics.
    pub fn label(self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }

    pub fn header_value(self) -> HeaderValue {
        HeaderValue::from_static(self.as_str())
    }
}

pub fn is_stripped_response_header(name: &HeaderName) -> bool {
    STRIPPED_RESPONSE_HEADERS.contains(name)
}

/// Copy origin response headers onto a client response, in order,
/// keeping every value of multi-value headers.
pub fn copy_response_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        if !is_stripped_response_header(name) {
            to.append(name.clone(), value.clone());
        }
    }
}

/// Inbound headers as sent to the origin: everything but `Host`, which is
/// replaced by the origin's own authority.
pub fn forwarded_request_headers(inbound: &HeaderMap, origin_host: &HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if *name != HOST {
            headers.append(name.clone(), value.clone());
        }
    }
    headers.insert(HOST, origin_host.clone());
    headers
}
