//! Client response construction.
//!
//! # Responsibilities
//! - Rebuild a client response from a stored or freshly forwarded origin response
//! - Strip framing headers and add the `X-Cache` marker
//! - Render proxy-generated errors as JSON bodies

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::cache::CachedResponse;
use crate::http::headers::{copy_response_headers, CacheStatus, X_CACHE};

/// JSON body of responses the proxy generates itself.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Replay an origin response to the client.
pub fn relay(upstream: &CachedResponse, cache: CacheStatus) -> Response {
    let mut response = Response::new(Body::from(upstream.body.clone()));
    *response.status_mut() = upstream.status;

    let headers = response.headers_mut();
    copy_response_headers(&upstream.headers, headers);
    // Set last so an origin-supplied X-Cache never masks ours.
    headers.insert(X_CACHE, cache.header_value());

    response
}

pub fn error_response(status: StatusCode, error: &'static str, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        error,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

/// `502` for transport failures talking to the origin.
pub fn bad_gateway(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_GATEWAY, "Bad Gateway", message)
}
