//! API Handlers
//!
//! HTTP request handlers for each sentiment server endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use tokio::time::Instant;

use crate::aggregator::{Aggregator, SnapshotProvider};
use crate::analysis::analyze_text;
use crate::cache::SentimentCache;
use crate::config::{CacheConfig, Config};
use crate::error::{AppError, Result};
use crate::models::{AnalyzeRequest, AnalyzeResponse, HealthResponse, SentimentSnapshot, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot cache in front of the upstream aggregator
    pub cache: SentimentCache,
    /// When the server started, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: SentimentCache) -> Self {
        Self {
            cache,
            started_at: Instant::now(),
        }
    }

    /// Creates a new AppState whose cache refreshes from `provider`.
    pub fn with_provider(provider: Arc<dyn SnapshotProvider>, config: CacheConfig) -> Self {
        Self::new(SentimentCache::new(provider, config))
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the live upstream sources behind the cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let aggregator = Aggregator::from_config(config)?;
        Ok(Self::with_provider(Arc::new(aggregator), config.cache_config()))
    }
}

/// Handler for GET /api/sentiment
///
/// Always answers; the cache degrades to stale or neutral data on its own.
pub async fn sentiment_handler(State(state): State<AppState>) -> Json<Arc<SentimentSnapshot>> {
    Json(state.cache.get_snapshot().await)
}

/// Handler for POST /api/analyze
///
/// Scores free text against one category's keyword lists.
pub async fn analyze_handler(Json(req): Json<AnalyzeRequest>) -> Result<Json<AnalyzeResponse>> {
    let category = req.validate().map_err(AppError::InvalidRequest)?;
    let score = analyze_text(&req.text, category);

    Ok(Json(AnalyzeResponse::new(category, score)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.cache.stats()))
}

/// Handler for GET /health
///
/// Reports uptime and cache diagnostics without touching the upstreams.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = state.started_at.elapsed().as_secs();
    Json(HealthResponse::ok(uptime, state.cache.diagnostics()))
}
