//! Cache Warm-up Task
//!
//! Fetches the first snapshot at startup so early requests hit a warm cache.

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::SentimentCache;

/// Spawns a one-shot task that reads the cache once.
///
/// The read goes through the normal single-flight path, so a request arriving
/// while the warm-up is running waits on the same refresh instead of starting
/// another. Upstream failures leave the cache empty and are only logged.
///
/// # Returns
/// A JoinHandle that can be aborted during graceful shutdown.
pub fn spawn_warmup_task(cache: SentimentCache) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Warming up sentiment cache");

        let snapshot = cache.get_snapshot().await;

        if snapshot.is_fallback_only() {
            warn!("Cache warm-up finished without live data");
        } else {
            info!(
                "Cache warm-up complete (generated at {})",
                snapshot.generated_at
            );
        }
    })
}
