//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → handler.rs (cache key, lookup, hit/miss decision)
//!     → forward.rs (miss only: mirror request to origin)
//!     → response.rs + headers.rs (rebuild response, strip framing, X-Cache)
//!     → Send to client
//! ```

pub mod forward;
pub mod handler;
pub mod headers;
pub mod response;
pub mod server;

pub use forward::{ForwardOutcome, Forwarder};
pub use headers::{CacheStatus, X_CACHE};
pub use server::HttpServer;
