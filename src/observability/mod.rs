//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handler, cache store, startup:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms via the metrics facade)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Metric calls are no-ops until an exporter is installed, so library code
//!   and tests record unconditionally

pub mod logging;
pub mod metrics;
