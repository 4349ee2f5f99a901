//! Cache Statistics Module
//!
//! Tracks how reads were answered and how refreshes went.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache read outcomes and refresh health.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Calls to `get_snapshot`
    pub reads: u64,
    /// Reads answered from a snapshot younger than the TTL
    pub fresh_hits: u64,
    /// Reads answered from a stale snapshot while revalidating
    pub stale_hits: u64,
    /// Reads answered from an old snapshot because a refresh was running
    pub in_flight_hits: u64,
    /// Refreshes started (foreground and background)
    pub refreshes: u64,
    /// Refreshes that ended without a snapshot
    pub refresh_failures: u64,
    /// Foreground callers that gave up waiting on their own refresh
    pub refresh_timeouts: u64,
    /// Callers whose bounded wait on another refresh expired
    pub wait_timeouts: u64,
    /// Reads answered with the synthesized neutral snapshot
    pub defaults_served: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Share of reads served straight from the slot without waiting.
    ///
    /// Returns 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.reads == 0 {
            return 0.0;
        }
        let served = self.fresh_hits + self.stale_hits + self.in_flight_hits;
        served as f64 / self.reads as f64
    }

    pub fn record_read(&mut self) {
        self.reads += 1;
    }

    pub fn record_fresh_hit(&mut self) {
        self.fresh_hits += 1;
    }

    pub fn record_stale_hit(&mut self) {
        self.stale_hits += 1;
    }

    pub fn record_in_flight_hit(&mut self) {
        self.in_flight_hits += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn record_refresh_failure(&mut self) {
        self.refresh_failures += 1;
    }

    pub fn record_refresh_timeout(&mut self) {
        self.refresh_timeouts += 1;
    }

    pub fn record_wait_timeout(&mut self) {
        self.wait_timeouts += 1;
    }

    pub fn record_default_served(&mut self) {
        self.defaults_served += 1;
    }
}
