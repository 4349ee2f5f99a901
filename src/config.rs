//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

// == Society Source ==
/// Which upstream feed supplies the society sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocietySource {
    GoogleNews,
    Reddit,
    Ptt,
}

impl FromStr for SocietySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "googlenews" | "google" => Ok(Self::GoogleNews),
            "reddit" => Ok(Self::Reddit),
            "ptt" => Ok(Self::Ptt),
            other => Err(format!("unknown society source: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Freshness window of a cached snapshot in milliseconds
    pub cache_ttl_ms: u64,
    /// Snapshots younger than `ttl * stale_multiplier` may be served while revalidating
    pub stale_multiplier: u32,
    /// Longest a caller waits on someone else's refresh when no data exists yet
    pub wait_timeout_ms: u64,
    /// Re-check interval while waiting on a refresh
    pub poll_interval_ms: u64,
    /// Longest a caller waits on its own foreground refresh
    pub refresh_timeout_ms: u64,
    /// Per-request timeout for upstream HTTP calls
    pub upstream_timeout_ms: u64,
    /// Feed used for the society reading
    pub society_source: SocietySource,
    /// Origins accepted by CORS in production
    pub allowed_origins: Vec<String>,
    /// Strict CORS when true
    pub production: bool,
    /// Requests per minute across `/api`
    pub api_rate_limit: u32,
    /// Requests per minute on `/api/analyze`
    pub analyze_rate_limit: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3001)
    /// - `CACHE_TTL_MS` - Snapshot freshness window (default: 30000)
    /// - `CACHE_STALE_MULTIPLIER` - Stale-while-revalidate window as a TTL multiple (default: 2)
    /// - `CACHE_WAIT_TIMEOUT_MS` - Bounded wait on an in-flight refresh (default: 5000)
    /// - `CACHE_POLL_INTERVAL_MS` - Bounded wait re-check interval (default: 100)
    /// - `CACHE_REFRESH_TIMEOUT_MS` - Foreground refresh wait (default: 10000)
    /// - `UPSTREAM_TIMEOUT_MS` - Upstream HTTP timeout (default: 5000)
    /// - `SOCIETY_SOURCE` - `googlenews`, `reddit` or `ptt` (default: googlenews)
    /// - `ALLOWED_ORIGINS` - Comma separated CORS allowlist
    /// - `APP_ENV` - `production` enables strict CORS
    /// - `API_RATE_LIMIT` - Requests per minute on `/api` (default: 60)
    /// - `ANALYZE_RATE_LIMIT` - Requests per minute on `/api/analyze` (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            cache_ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            stale_multiplier: parse_var("CACHE_STALE_MULTIPLIER")
                .filter(|m| *m >= 1)
                .unwrap_or(defaults.stale_multiplier),
            wait_timeout_ms: parse_var("CACHE_WAIT_TIMEOUT_MS")
                .unwrap_or(defaults.wait_timeout_ms),
            poll_interval_ms: parse_var("CACHE_POLL_INTERVAL_MS")
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.poll_interval_ms),
            refresh_timeout_ms: parse_var("CACHE_REFRESH_TIMEOUT_MS")
                .unwrap_or(defaults.refresh_timeout_ms),
            upstream_timeout_ms: parse_var("UPSTREAM_TIMEOUT_MS")
                .unwrap_or(defaults.upstream_timeout_ms),
            society_source: parse_var("SOCIETY_SOURCE").unwrap_or(defaults.society_source),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| split_origins(&v))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.allowed_origins),
            production: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            api_rate_limit: parse_var("API_RATE_LIMIT").unwrap_or(defaults.api_rate_limit),
            analyze_rate_limit: parse_var("ANALYZE_RATE_LIMIT")
                .unwrap_or(defaults.analyze_rate_limit),
        }
    }

    /// Timing knobs consumed by the sentiment cache.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_millis(self.cache_ttl_ms),
            stale_multiplier: self.stale_multiplier,
            wait_timeout: Duration::from_millis(self.wait_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            refresh_timeout: Duration::from_millis(self.refresh_timeout_ms),
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3001,
            cache_ttl_ms: 30_000,
            stale_multiplier: 2,
            wait_timeout_ms: 5_000,
            poll_interval_ms: 100,
            refresh_timeout_ms: 10_000,
            upstream_timeout_ms: 5_000,
            society_source: SocietySource::GoogleNews,
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            production: false,
            api_rate_limit: 60,
            analyze_rate_limit: 10,
        }
    }
}

// == Cache Config ==
/// Timing configuration for [`crate::cache::SentimentCache`].
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub stale_multiplier: u32,
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
    pub refresh_timeout: Duration,
}

impl CacheConfig {
    /// Age below which a stale snapshot is still served with a background refresh.
    pub fn stale_window(&self) -> Duration {
        self.ttl * self.stale_multiplier
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Config::default().cache_config()
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
