//! Origin forwarding.
//!
//! # Responsibilities
//! - Mirror the inbound request (method, target, headers, body) to the origin
//! - Rewrite `Host` to the origin's authority
//! - Collect the full origin response without decoding it
//! - Bound the whole exchange with connect and request timeouts
//! - Speak TLS to `https` origins (webpki roots), plain TCP to `http` ones
//!
//! # Design Decisions
//! - Exactly one attempt; no retries
//! - Any HTTP status is a successful forward; only transport problems fail
//! - Failures are folded into `ForwardOutcome::TransportFailure` with the full
//!   error chain as description

use std::error::Error as StdError;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{uri::InvalidUri, HeaderMap, Method, Request, Uri},
};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time;

use crate::cache::CachedResponse;
use crate::config::{Origin, TimeoutConfig};
use crate::http::headers::forwarded_request_headers;

/// Result of one forward attempt.
#[derive(Debug)]
pub enum ForwardOutcome {
    /// The origin answered, with any status code.
    Forwarded(CachedResponse),
    /// No usable HTTP response was obtained.
    TransportFailure { description: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("invalid target URL {0:?}")]
    InvalidTarget(String, #[source] InvalidUri),

    #[error("failed to build origin request")]
    Build(#[from] axum::http::Error),

    #[error("request to origin failed")]
    Request(#[source] hyper_util::client::legacy::Error),

    #[error("failed to read origin response body")]
    Body(#[source] axum::Error),

    #[error("origin did not respond within {0:?}")]
    Timeout(Duration),
}

/// Client for the single configured origin.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    origin: Origin,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(origin: Origin, timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));
        // The TLS wrapper picks the scheme; the inner connector must accept both.
        connector.enforce_http(false);

        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .wrap_connector(connector);

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            origin,
            timeout: Duration::from_secs(timeouts.request_secs),
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Send the request to the origin and wait for the complete response.
    ///
    /// Dropping the returned future cancels the exchange; nothing is written
    /// anywhere until it resolves.
    pub async fn forward(
        &self,
        method: &Method,
        target_url: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> ForwardOutcome {
        let exchange = self.exchange(method, target_url, headers, body);

        let result = match time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ForwardError::Timeout(self.timeout)),
        };

        match result {
            Ok(response) => ForwardOutcome::Forwarded(response),
            Err(e) => ForwardOutcome::TransportFailure {
                description: describe(&e),
            },
        }
    }

    async fn exchange(
        &self,
        method: &Method,
        target_url: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<CachedResponse, ForwardError> {
        let uri: Uri = target_url
            .parse()
            .map_err(|e| ForwardError::InvalidTarget(target_url.to_string(), e))?;

        let mut request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::from(body))?;
        *request.headers_mut() = forwarded_request_headers(headers, self.origin.host());

        let response = self
            .client
            .request(request)
            .await
            .map_err(ForwardError::Request)?;

        let (parts, body): (_, Incoming) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(ForwardError::Body)?;

        Ok(CachedResponse::new(parts.status, parts.headers, body))
    }
}

/// Render an error and all of its sources as one line.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}
