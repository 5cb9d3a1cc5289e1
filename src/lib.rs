//! Caching HTTP reverse proxy library.

pub mod cache;
pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use cache::CacheStore;
pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
