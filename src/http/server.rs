//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router sending every method and path to the proxy handler
//! - Wire up middleware (request ID, tracing, body limits)
//! - Start the cache sweeper alongside the listener
//! - Serve until the shutdown broadcast fires, then drain in-flight requests

use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::cache::sweeper::CacheSweeper;
use crate::cache::CacheStore;
use crate::config::{ProxyConfig, ValidationError};
use crate::http::forward::Forwarder;
use crate::http::handler::{proxy_handler, AppState};
use crate::lifecycle::Shutdown;

/// HTTP server for the caching proxy.
pub struct HttpServer {
    router: Router,
    cache: CacheStore,
    sweep_interval: Option<Duration>,
    shutdown: broadcast::Receiver<()>,
    sweeper_shutdown: broadcast::Receiver<()>,
}

impl HttpServer {
    /// Create a new HTTP server serving from (and filling) `cache`.
    ///
    /// Subscribes to `shutdown` immediately, so a trigger issued any time
    /// after this returns is observed by `run`.
    pub fn new(
        config: ProxyConfig,
        cache: CacheStore,
        shutdown: &Shutdown,
    ) -> Result<Self, ValidationError> {
        let origin = config.origin.clone().ok_or(ValidationError::MissingOrigin)?;
        let forwarder = Forwarder::new(origin, &config.timeouts);

        let state = AppState {
            cache: cache.clone(),
            forwarder,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            cache,
            sweep_interval: config.cache.sweep_interval(),
            shutdown: shutdown.subscribe(),
            sweeper_shutdown: shutdown.subscribe(),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        if let Some(interval) = self.sweep_interval {
            let sweeper = CacheSweeper::new(self.cache.clone(), interval);
            tokio::spawn(sweeper.run(self.sweeper_shutdown));
        }

        let mut shutdown = self.shutdown;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
