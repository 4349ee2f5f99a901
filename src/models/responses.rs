//! Response DTOs for the sentiment server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::analysis::{Category, TextScore};
use crate::cache::{CacheDiagnostics, CacheStats};

/// Response body for the analyze operation (POST /api/analyze)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub tension: f64,
    pub buoyancy: f64,
    pub activity: f64,
    pub category: Category,
    pub positive_count: usize,
    pub negative_count: usize,
}

impl AnalyzeResponse {
    pub fn new(category: Category, score: TextScore) -> Self {
        Self {
            tension: score.tension,
            buoyancy: score.buoyancy,
            activity: score.activity,
            category,
            positive_count: score.positive_count,
            negative_count: score.negative_count,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Share of reads answered without waiting on the upstreams
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Health status (always "ok" while the process serves requests)
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Snapshot cache diagnostics
    pub cache: CacheDiagnostics,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok(uptime_seconds: u64, cache: CacheDiagnostics) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds,
            cache,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostics() -> CacheDiagnostics {
        CacheDiagnostics {
            has_data: true,
            age_seconds: Some(12),
            ttl_seconds: 30,
            refresh_in_flight: false,
        }
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::ok(42, diagnostics());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["uptimeSeconds"], 42);
        assert_eq!(json["cache"]["hasData"], true);
        assert_eq!(json["cache"]["ageSeconds"], 12);
        assert_eq!(json["cache"]["ttlSeconds"], 30);
        assert_eq!(json["cache"]["refreshInFlight"], false);
    }

    #[test]
    fn test_stats_response_flattens_counters() {
        let mut stats = CacheStats::new();
        stats.record_fresh_hit();
        stats.record_fresh_hit();
        stats.record_refresh();
        let json = serde_json::to_value(StatsResponse::new(stats)).unwrap();
        assert_eq!(json["freshHits"], 2);
        assert_eq!(json["refreshes"], 1);
        assert!(json.get("hitRate").is_some());
    }

    #[test]
    fn test_analyze_response_serialize() {
        let score = TextScore {
            tension: 0.1,
            buoyancy: 0.9,
            activity: 0.8,
            positive_count: 3,
            negative_count: 0,
        };
        let json = serde_json::to_value(AnalyzeResponse::new(Category::Tech, score)).unwrap();
        assert_eq!(json["category"], "tech");
        assert_eq!(json["positiveCount"], 3);
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
