//! Background purge of expired entries.
//!
//! Lookups already ignore expired entries; the sweeper only bounds memory
//! for keys that are never requested again.

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time;

use crate::cache::store::CacheStore;

pub struct CacheSweeper {
    store: CacheStore,
    interval: Duration,
}

impl CacheSweeper {
    pub fn new(store: CacheStore, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            ttl_secs = self.store.ttl().as_secs(),
            "Cache sweeper starting"
        );

        let mut ticker = time::interval(self.interval);
        // The first tick completes immediately; nothing can be expired yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.store.purge_expired();
                    if removed > 0 {
                        tracing::debug!(
                            removed,
                            remaining = self.store.len(),
                            "Purged expired cache entries"
                        );
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Cache sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
