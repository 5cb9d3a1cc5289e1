//! Per-request cache/forward pipeline.
//!
//! ```text
//! START → KEY_DERIVED ─┬→ CACHE_HIT ──────────────────────────────→ RESPONDED
//!                      └→ CACHE_MISS → FORWARDING ─┬→ FORWARD_OK ──→ RESPONDED
//!                                                  └→ FORWARD_ERROR → RESPONDED
//! ```
//!
//! Every path ends in a response. Origin error statuses are cached exactly
//! like successes; only transport failures skip the store.

use std::error::Error as StdError;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
};
use http_body_util::LengthLimitError;

use crate::cache::{CacheKey, CacheStore};
use crate::http::forward::{ForwardOutcome, Forwarder};
use crate::http::headers::{CacheStatus, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheStore,
    pub forwarder: Forwarder,
}

/// Main proxy handler.
pub async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (parts, body) = request.into_parts();
    let method = parts.method;
    let target_url = state.forwarder.origin().target_url(&parts.uri);
    let key = CacheKey::new(&method, &target_url);

    if let Some(cached) = state.cache.get(&key) {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            url = %target_url,
            "Cache HIT"
        );
        metrics::record_request(
            method.as_str(),
            cached.status.as_u16(),
            CacheStatus::Hit.label(),
            start_time,
        );
        return response::relay(&cached, CacheStatus::Hit);
    }

    tracing::info!(
        request_id = %request_id,
        method = %method,
        url = %target_url,
        "Cache MISS"
    );

    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let (status, error) = if exceeds_body_limit(&e) {
                (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
            } else {
                (StatusCode::BAD_REQUEST, "Bad Request")
            };
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                url = %target_url,
                error = %e,
                "Failed to read request body"
            );
            metrics::record_request(
                method.as_str(),
                status.as_u16(),
                CacheStatus::Miss.label(),
                start_time,
            );
            return response::error_response(status, error, e.to_string());
        }
    };

    match state
        .forwarder
        .forward(&method, &target_url, &parts.headers, body)
        .await
    {
        ForwardOutcome::Forwarded(upstream) => {
            tracing::debug!(
                request_id = %request_id,
                status = upstream.status.as_u16(),
                bytes = upstream.body.len(),
                "Origin responded, caching"
            );
            let stored = state.cache.set(key, upstream);
            metrics::record_request(
                method.as_str(),
                stored.status.as_u16(),
                CacheStatus::Miss.label(),
                start_time,
            );
            response::relay(&stored, CacheStatus::Miss)
        }
        ForwardOutcome::TransportFailure { description } => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                url = %target_url,
                error = %description,
                "Proxy error"
            );
            metrics::record_upstream_error();
            metrics::record_request(
                method.as_str(),
                StatusCode::BAD_GATEWAY.as_u16(),
                CacheStatus::Miss.label(),
                start_time,
            );
            response::bad_gateway(description)
        }
    }
}

fn exceeds_body_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
