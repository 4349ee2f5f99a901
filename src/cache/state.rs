//! Cache State Module
//!
//! The single cached slot and its staleness bookkeeping.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::models::SentimentSnapshot;

// == Cache State ==
/// Single-slot snapshot cache state.
///
/// Once `snapshot` is set it is only ever replaced by a newer one, never
/// cleared. `refresh_in_flight` is true for exactly the duration of one
/// refresh.
#[derive(Debug, Default)]
pub struct CacheState {
    /// Latest snapshot, shared with every reader
    pub snapshot: Option<Arc<SentimentSnapshot>>,
    /// When `snapshot` was stored
    pub last_refresh_at: Option<Instant>,
    /// Gate admitting at most one refresh at a time
    pub refresh_in_flight: bool,
}

impl CacheState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    // == Age ==
    /// Age of the stored snapshot, or None while the cache is empty.
    pub fn age(&self, now: Instant) -> Option<Duration> {
        self.snapshot.as_ref()?;
        self.last_refresh_at
            .map(|at| now.saturating_duration_since(at))
    }

    // == Store ==
    /// Replaces the snapshot if `refreshed_at` is not older than the current one.
    ///
    /// Returns false when the snapshot was discarded as out of date.
    pub fn store(&mut self, snapshot: Arc<SentimentSnapshot>, refreshed_at: Instant) -> bool {
        if matches!(self.last_refresh_at, Some(last) if refreshed_at < last) {
            return false;
        }
        self.snapshot = Some(snapshot);
        self.last_refresh_at = Some(refreshed_at);
        true
    }

    // == Diagnostics ==
    pub fn diagnostics(&self, now: Instant, ttl: Duration) -> CacheDiagnostics {
        CacheDiagnostics {
            has_data: self.snapshot.is_some(),
            age_seconds: self.age(now).map(|age| age.as_secs()),
            ttl_seconds: ttl.as_secs(),
            refresh_in_flight: self.refresh_in_flight,
        }
    }
}

// == Cache Diagnostics ==
/// Health view of the cache exposed on `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheDiagnostics {
    pub has_data: bool,
    pub age_seconds: Option<u64>,
    pub ttl_seconds: u64,
    pub refresh_in_flight: bool,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_new_is_empty() {
        let state = CacheState::new();
        assert!(state.snapshot.is_none());
        assert!(!state.refresh_in_flight);
        assert_eq!(state.age(Instant::now()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_age_tracks_last_refresh() {
        let mut state = CacheState::new();
        let at = Instant::now();
        state.store(Arc::new(SentimentSnapshot::neutral_default()), at);

        tokio::time::advance(Duration::from_secs(7)).await;
        assert_eq!(state.age(Instant::now()), Some(Duration::from_secs(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_rejects_older_snapshot() {
        let mut state = CacheState::new();
        let first = Instant::now();
        tokio::time::advance(Duration::from_secs(1)).await;
        let second = Instant::now();

        let newer = Arc::new(SentimentSnapshot::neutral_default());
        assert!(state.store(newer.clone(), second));
        assert!(!state.store(Arc::new(SentimentSnapshot::neutral_default()), first));
        assert!(Arc::ptr_eq(state.snapshot.as_ref().unwrap(), &newer));
    }

    #[tokio::test(start_paused = true)]
    async fn test_diagnostics() {
        let mut state = CacheState::new();
        let empty = state.diagnostics(Instant::now(), Duration::from_secs(30));
        assert!(!empty.has_data);
        assert_eq!(empty.age_seconds, None);
        assert_eq!(empty.ttl_seconds, 30);

        state.store(Arc::new(SentimentSnapshot::neutral_default()), Instant::now());
        state.refresh_in_flight = true;
        tokio::time::advance(Duration::from_millis(2500)).await;

        let full = state.diagnostics(Instant::now(), Duration::from_secs(30));
        assert!(full.has_data);
        assert_eq!(full.age_seconds, Some(2));
        assert!(full.refresh_in_flight);
    }
}
