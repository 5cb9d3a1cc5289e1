//! In-memory response cache.
//!
//! # Data Flow
//! ```text
//! (method, target URL)
//!     → key.rs (CacheKey "METHOD:URL")
//!     → store.rs (DashMap lookup, lazy expiry check)
//!     → entry.rs (CachedResponse + created_at)
//!
//! Background:
//!     sweeper.rs ticks → store.purge_expired()
//! ```
//!
//! # Design Decisions
//! - Single global TTL fixed when the store is built; no per-entry override
//! - Fixed-expiry map, not LRU: entries leave only by expiry or flush
//! - Stored responses sit behind `Arc` and are never mutated
//! - The store is an explicit handle owned by startup, never a global

pub mod entry;
pub mod key;
pub mod store;
pub mod sweeper;

pub use entry::{CacheEntry, CachedResponse};
pub use key::CacheKey;
pub use store::CacheStore;
