//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → command line overrides (cli.rs, merged in loader.rs)
//!     → validation.rs (semantic checks, skipped for --clear-cache)
//!     → ProxyConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved
//! - All fields have defaults to allow minimal configs
//! - Origin URLs are parsed into a typed value at the edge, so bad input
//!   fails during argument or file parsing

pub mod loader;
pub mod origin;
pub mod schema;
pub mod validation;

pub use loader::{resolve, ConfigError};
pub use origin::{Origin, OriginError};
pub use schema::{
    CacheConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, SecurityConfig, TimeoutConfig,
};
pub use validation::ValidationError;
