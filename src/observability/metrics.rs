//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, cache outcome
//! - `proxy_request_duration_seconds` (histogram): latency by method, cache outcome
//! - `proxy_cache_entries` (gauge): entries currently held by the store
//! - `proxy_cache_evictions_total` (counter): removed entries by reason
//! - `proxy_upstream_errors_total` (counter): transport failures talking to the origin

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| e.to_string())?;

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished proxy request.
pub fn record_request(method: &str, status: u16, cache: &'static str, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "cache" => cache
    )
    .increment(1);

    metrics::histogram!(
        "proxy_request_duration_seconds",
        "method" => method.to_string(),
        "cache" => cache
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_size(entries: usize) {
    metrics::gauge!("proxy_cache_entries").set(entries as f64);
}

pub fn record_cache_eviction(reason: &'static str, count: usize) {
    metrics::counter!("proxy_cache_evictions_total", "reason" => reason).increment(count as u64);
}

pub fn record_upstream_error() {
    metrics::counter!("proxy_upstream_errors_total").increment(1);
}
