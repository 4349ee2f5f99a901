//! Fixed-window rate limiting
//!
//! Each limiter admits at most `max_requests` per window from each client IP
//! on the routes it guards. A client's count restarts when its window expires.
//! Requests without a known peer address share one budget.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;
use tracing::warn;

use crate::error::{AppError, Result};

/// Length of one counting window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Tracked clients above which expired windows are swept on the next check.
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: u32,
}

// == Rate Limiter ==
/// Per-client request counters for one route group.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    name: &'static str,
    max_requests: u32,
    window_len: Duration,
    message: &'static str,
    windows: Arc<Mutex<HashMap<Option<IpAddr>, Window>>>,
}

impl RateLimiter {
    pub fn new(name: &'static str, max_requests: u32, message: &'static str) -> Self {
        Self {
            name,
            max_requests,
            window_len: RATE_LIMIT_WINDOW,
            message,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Limiter for everything under `/api`.
    pub fn api(max_requests: u32) -> Self {
        Self::new("api", max_requests, "Too many requests, please try again later")
    }

    /// Stricter limiter for `/api/analyze`.
    pub fn analyze(max_requests: u32) -> Self {
        Self::new(
            "analyze",
            max_requests,
            "Analyze rate limit exceeded. Please wait a moment.",
        )
    }

    /// Counts one request from `client`, failing once its budget is spent.
    pub fn check(&self, client: Option<IpAddr>) -> Result<()> {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        if windows.len() >= SWEEP_THRESHOLD {
            let window_len = self.window_len;
            windows.retain(|_, w| now.duration_since(w.started_at) < window_len);
        }

        let window = windows.entry(client).or_insert(Window {
            started_at: now,
            count: 0,
        });
        if now.duration_since(window.started_at) >= self.window_len {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            warn!(
                "Rate limit '{}' exceeded by {:?} ({} per window)",
                self.name, client, self.max_requests
            );
            return Err(AppError::RateLimited(self.message.to_string()));
        }

        window.count += 1;
        Ok(())
    }

    /// Number of clients currently holding a window.
    pub fn tracked_clients(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// axum middleware rejecting requests over the client's budget with 429.
///
/// The peer address comes from `ConnectInfo`, which is present when the
/// router is served with `into_make_service_with_connect_info`.
pub async fn enforce(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    limiter.check(client)?;
    Ok(next.run(request).await)
}
