//! Request and Response models for the sentiment server API
//!
//! This module defines the snapshot types produced by the aggregator and the
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod snapshot;

/// Display name of the tracked market index.
pub const MARKET_INDEX_NAME: &str = "加權指數";

// Re-export commonly used types
pub use requests::{AnalyzeRequest, MAX_TEXT_LENGTH};
pub use responses::{AnalyzeResponse, ErrorResponse, HealthResponse, StatsResponse};
pub use snapshot::{
    DomainSentiments, MarketData, Sentiment, SentimentSnapshot, SentimentStatus,
    NEUTRAL_ACTIVITY, NEUTRAL_LEVEL,
};
