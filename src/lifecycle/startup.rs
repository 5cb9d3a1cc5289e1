//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize metrics, the cache store and the HTTP server in order
//! - Bind the listener last and serve until a shutdown signal arrives
//! - Run the clear-cache operation without binding anything

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::cache::CacheStore;
use crate::config::{ProxyConfig, ValidationError};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Fatal errors that stop the process.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ValidationError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(String),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Flush every cached entry and report how many were dropped.
///
/// Entries only live in this process's memory, so a freshly started process
/// has nothing to drop; the operation still goes through the store so the
/// flush path is the same one a long-lived owner would use.
pub fn clear_cache(config: &ProxyConfig) -> usize {
    let cache = CacheStore::new(config.cache.ttl());
    let removed = cache.flush_all();
    tracing::info!(removed, "Cache flushed");
    removed
}

/// Start the proxy and block until it has shut down gracefully.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| {
                ValidationError::InvalidMetricsAddress(config.observability.metrics_address.clone())
            })?;
        metrics::init_metrics(addr).map_err(StartupError::Metrics)?;
    }

    let cache = CacheStore::new(config.cache.ttl());
    let shutdown = Shutdown::new();

    let bind_address = config
        .listener
        .bind_address()
        .ok_or(ValidationError::MissingPort)?;
    let origin = config.origin.clone().ok_or(ValidationError::MissingOrigin)?;
    let ttl_secs = config.cache.ttl_secs;

    let server = HttpServer::new(config, cache, &shutdown)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

    tracing::info!(port = local_addr.port(), "Proxy server running on port {}", local_addr.port());
    tracing::info!(origin = %origin, ttl_secs, "Forwarding requests to {}", origin);

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match signals::shutdown_signal().await {
            Ok(()) => {
                tracing::info!("Shutting down server...");
                trigger.trigger();
            }
            Err(e) => tracing::error!(error = %e, "Failed to install signal handlers"),
        }
    });

    server.run(listener).await.map_err(StartupError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
