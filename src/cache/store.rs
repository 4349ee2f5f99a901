//! Sentiment Cache Module
//!
//! Single-slot snapshot cache with stale-while-revalidate reads and at most
//! one upstream refresh in flight.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::aggregator::SnapshotProvider;
use crate::cache::{wait_until, CacheDiagnostics, CacheState, CacheStats};
use crate::config::CacheConfig;
use crate::error::AppError;
use crate::models::SentimentSnapshot;

struct Shared {
    provider: Arc<dyn SnapshotProvider>,
    config: CacheConfig,
    state: Mutex<CacheState>,
    stats: Mutex<CacheStats>,
    /// Signalled whenever a refresh finishes, successfully or not
    refresh_done: Notify,
}

impl Shared {
    // Critical sections never span an await, so a poisoned lock still holds
    // consistent data.
    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stats(&self) -> MutexGuard<'_, CacheStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Refresh Guard ==
/// Ownership of the refresh slot. Dropping it clears `refresh_in_flight`
/// and wakes waiters, whether the refresh succeeded, failed, or panicked.
struct RefreshGuard {
    shared: Arc<Shared>,
}

impl RefreshGuard {
    /// Claims the slot if no refresh is running.
    fn acquire(state: &mut CacheState, shared: &Arc<Shared>) -> Option<Self> {
        if state.refresh_in_flight {
            return None;
        }
        state.refresh_in_flight = true;
        Some(Self {
            shared: Arc::clone(shared),
        })
    }
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.shared.state().refresh_in_flight = false;
        self.shared.refresh_done.notify_waiters();
    }
}

/// How a read will be answered, decided atomically under the state lock.
enum Plan {
    Fresh(Arc<SentimentSnapshot>),
    Revalidate(Arc<SentimentSnapshot>, RefreshGuard),
    InFlight(Arc<SentimentSnapshot>),
    Wait,
    Refresh(RefreshGuard),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Foreground,
    Background,
}

// == Sentiment Cache ==
/// Cheaply clonable handle to one snapshot cache.
///
/// Each instance owns its own state; tests construct independent caches.
#[derive(Clone)]
pub struct SentimentCache {
    shared: Arc<Shared>,
}

impl SentimentCache {
    // == Constructor ==
    /// Creates an empty cache refreshing from `provider`.
    pub fn new(provider: Arc<dyn SnapshotProvider>, config: CacheConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                provider,
                config,
                state: Mutex::new(CacheState::new()),
                stats: Mutex::new(CacheStats::new()),
                refresh_done: Notify::new(),
            }),
        }
    }

    // == Get Snapshot ==
    /// Returns the freshest available snapshot. Never fails.
    ///
    /// In priority order:
    /// 1. A snapshot younger than the TTL is returned as is.
    /// 2. A snapshot younger than the stale window is returned immediately and
    ///    a background refresh is started, unless one is already running.
    /// 3. While a refresh runs, an existing snapshot of any age is returned
    ///    immediately; with no snapshot the caller waits at most `wait_timeout`.
    /// 4. Otherwise this caller refreshes and waits at most `refresh_timeout`.
    ///
    /// Failed refreshes fall back to the previous snapshot, then to a
    /// synthesized neutral snapshot.
    pub async fn get_snapshot(&self) -> Arc<SentimentSnapshot> {
        self.shared.stats().record_read();

        match self.plan(Instant::now()) {
            Plan::Fresh(snapshot) => {
                self.shared.stats().record_fresh_hit();
                snapshot
            }
            Plan::Revalidate(snapshot, guard) => {
                self.shared.stats().record_stale_hit();
                debug!("Serving stale snapshot while revalidating");
                drop(self.spawn_refresh(guard, Trigger::Background));
                snapshot
            }
            Plan::InFlight(snapshot) => {
                self.shared.stats().record_in_flight_hit();
                snapshot
            }
            Plan::Wait => self.wait_for_refresh().await,
            Plan::Refresh(guard) => self.refresh_now(guard).await,
        }
    }

    fn plan(&self, now: Instant) -> Plan {
        let shared = &self.shared;
        let config = &shared.config;
        let mut state = shared.state();

        if let (Some(snapshot), Some(age)) = (state.snapshot.clone(), state.age(now)) {
            if age < config.ttl {
                return Plan::Fresh(snapshot);
            }
            if age < config.stale_window() {
                if let Some(guard) = RefreshGuard::acquire(&mut state, shared) {
                    return Plan::Revalidate(snapshot, guard);
                }
            }
        }

        if let Some(guard) = RefreshGuard::acquire(&mut state, shared) {
            return Plan::Refresh(guard);
        }

        match state.snapshot.clone() {
            Some(snapshot) => Plan::InFlight(snapshot),
            None => Plan::Wait,
        }
    }

    /// Runs one refresh on its own task so it completes even if the caller
    /// that started it goes away.
    fn spawn_refresh(
        &self,
        guard: RefreshGuard,
        trigger: Trigger,
    ) -> JoinHandle<Option<Arc<SentimentSnapshot>>> {
        let shared = Arc::clone(&self.shared);
        shared.stats().record_refresh();

        tokio::spawn(async move {
            let _guard = guard;

            // A panicking provider is a failed refresh like any other.
            let outcome = AssertUnwindSafe(shared.provider.fetch_fresh_snapshot())
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(AppError::Internal("snapshot provider panicked".to_string())));

            match outcome {
                Ok(snapshot) => {
                    let snapshot = Arc::new(snapshot);
                    shared.state().store(Arc::clone(&snapshot), Instant::now());
                    match trigger {
                        Trigger::Foreground => debug!("Cache refreshed"),
                        Trigger::Background => info!("Cache updated in background"),
                    }
                    Some(snapshot)
                }
                Err(err) => {
                    shared.stats().record_refresh_failure();
                    match trigger {
                        Trigger::Foreground => error!("Failed to update cache: {}", err),
                        Trigger::Background => warn!("Background cache update failed: {}", err),
                    }
                    None
                }
            }
        })
    }

    async fn refresh_now(&self, guard: RefreshGuard) -> Arc<SentimentSnapshot> {
        let refresh_timeout = self.shared.config.refresh_timeout;
        let handle = self.spawn_refresh(guard, Trigger::Foreground);

        match tokio::time::timeout(refresh_timeout, handle).await {
            Ok(Ok(Some(snapshot))) => snapshot,
            Ok(Ok(None)) => self.stale_or_default(),
            Ok(Err(join_err)) => {
                // Only reachable if the runtime cancels the task.
                self.shared.stats().record_refresh_failure();
                error!("Cache refresh task died: {}", join_err);
                self.stale_or_default()
            }
            Err(_) => {
                // The refresh keeps running and will fill the slot when done.
                self.shared.stats().record_refresh_timeout();
                warn!(
                    "Cache refresh still running after {:?}, serving best available data",
                    refresh_timeout
                );
                self.stale_or_default()
            }
        }
    }

    async fn wait_for_refresh(&self) -> Arc<SentimentSnapshot> {
        let shared = &self.shared;
        let config = &shared.config;

        let finished = wait_until(
            &shared.refresh_done,
            || !shared.state().refresh_in_flight,
            config.wait_timeout,
            config.poll_interval,
        )
        .await;

        if !finished {
            shared.stats().record_wait_timeout();
            warn!(
                "Waited {:?} for cache refresh; refresh appears stuck",
                config.wait_timeout
            );
        }
        let current = self.current();
        self.or_default(current)
    }

    fn current(&self) -> Option<Arc<SentimentSnapshot>> {
        self.shared.state().snapshot.clone()
    }

    /// Serves whatever the slot holds after this caller's refresh failed.
    fn stale_or_default(&self) -> Arc<SentimentSnapshot> {
        let current = self.current();
        if current.is_some() {
            warn!("Returning stale data due to update failure");
        }
        self.or_default(current)
    }

    fn or_default(&self, snapshot: Option<Arc<SentimentSnapshot>>) -> Arc<SentimentSnapshot> {
        snapshot.unwrap_or_else(|| {
            self.shared.stats().record_default_served();
            warn!("No sentiment data yet, returning neutral default");
            Arc::new(SentimentSnapshot::neutral_default())
        })
    }

    // == Accessors ==
    /// Health view: presence, age, TTL, and refresh status.
    pub fn diagnostics(&self) -> CacheDiagnostics {
        self.shared
            .state()
            .diagnostics(Instant::now(), self.shared.config.ttl)
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.shared.stats().clone()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.shared.config
    }
}
