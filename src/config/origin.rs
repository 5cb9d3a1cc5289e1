//! Origin base URL parsing and target URL construction.

use std::fmt;
use std::str::FromStr;

use axum::http::{uri::InvalidUri, HeaderValue, Uri};
use serde::{Deserialize, Serialize};
use url::Url;

/// Error returned when an origin URL cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum OriginError {
    #[error("invalid origin URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported origin scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("origin URL {url:?} is not a valid request URI: {source}")]
    InvalidUri {
        url: String,
        #[source]
        source: InvalidUri,
    },

    #[error("origin URL {0:?} has no usable host")]
    MissingHost(String),

    #[error("origin URL {0:?} must not carry a query string or fragment")]
    UnexpectedSuffix(String),
}

/// The upstream server every request is forwarded to.
///
/// `base` keeps the URL as configured minus one trailing slash; target URLs
/// are built by appending the inbound path and query verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Origin {
    base: String,
    host: HeaderValue,
}

impl Origin {
    /// The base URL prefix, without trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Value for the outbound `Host` header (`host[:port]`).
    pub fn host(&self) -> &HeaderValue {
        &self.host
    }

    /// Absolute URL for an inbound request target.
    pub fn target_url(&self, uri: &Uri) -> String {
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        format!("{}{}", self.base, path_and_query)
    }
}

impl FromStr for Origin {
    type Err = OriginError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let base = trimmed.strip_suffix('/').unwrap_or(trimmed);

        let url = Url::parse(base).map_err(|source| OriginError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(OriginError::UnsupportedScheme(url.scheme().to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(OriginError::UnexpectedSuffix(raw.to_string()));
        }
        // Target URLs are `base` plus a path, so `base` itself must be a URI.
        base.parse::<Uri>()
            .map_err(|source| OriginError::InvalidUri {
                url: raw.to_string(),
                source,
            })?;

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| OriginError::MissingHost(raw.to_string()))?;
        // Url drops the scheme's default port, matching what clients send.
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let host = HeaderValue::from_str(&authority)
            .map_err(|_| OriginError::MissingHost(raw.to_string()))?;

        Ok(Self {
            base: base.to_string(),
            host,
        })
    }
}

impl TryFrom<String> for Origin {
    type Error = OriginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Origin> for String {
    fn from(origin: Origin) -> Self {
        origin.base
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
