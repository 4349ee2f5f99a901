//! Loom Sentiment - mood aggregation backend
//!
//! Collects market, tech, and society readings from public upstreams and
//! serves them through a stale-while-revalidate snapshot cache.

pub mod aggregator;
pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod sources;
pub mod tasks;

pub use aggregator::{Aggregator, SnapshotProvider};
pub use api::AppState;
pub use cache::SentimentCache;
pub use config::{CacheConfig, Config};
pub use error::{AppError, Result};
pub use tasks::spawn_warmup_task;
