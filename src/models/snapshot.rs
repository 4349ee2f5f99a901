//! Snapshot DTOs
//!
//! The composite sentiment reading served by `GET /api/sentiment`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Neutral midpoint used whenever no live reading is available.
pub const NEUTRAL_LEVEL: f64 = 0.5;

/// Activity reported for a quiet or unknown domain.
pub const NEUTRAL_ACTIVITY: f64 = 0.3;

// == Sentiment Status ==
/// Whether a reading came from a live upstream or a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentStatus {
    Live,
    Fallback,
}

// == Sentiment ==
/// One domain's emotional reading.
///
/// `tension` and `buoyancy` move in opposite directions but are not
/// constrained to sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentiment {
    pub tension: f64,
    pub buoyancy: f64,
    pub activity: f64,
    pub source: String,
    pub status: SentimentStatus,
    /// Number of titles scored, for live text sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
}

impl Sentiment {
    /// Builds a live reading, clamping every level into `[0, 1]`.
    pub fn live(source: impl Into<String>, tension: f64, buoyancy: f64, activity: f64) -> Self {
        Self {
            tension: unit(tension),
            buoyancy: unit(buoyancy),
            activity: unit(activity),
            source: source.into(),
            status: SentimentStatus::Live,
            item_count: None,
        }
    }

    /// Builds a source-specific placeholder reading.
    pub fn fallback(source: impl Into<String>, tension: f64, buoyancy: f64, activity: f64) -> Self {
        Self {
            status: SentimentStatus::Fallback,
            ..Self::live(source, tension, buoyancy, activity)
        }
    }

    /// Neutral placeholder: midpoint tension and buoyancy, low activity.
    pub fn neutral(source: impl Into<String>) -> Self {
        Self::fallback(source, NEUTRAL_LEVEL, NEUTRAL_LEVEL, NEUTRAL_ACTIVITY)
    }

    pub fn with_item_count(mut self, count: usize) -> Self {
        self.item_count = Some(count);
        self
    }

    pub fn is_live(&self) -> bool {
        self.status == SentimentStatus::Live
    }
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        NEUTRAL_LEVEL
    }
}

// == Market Data ==
/// Raw index reading from the market source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub name: String,
    pub price: f64,
    pub change: f64,
    /// Percentage change against the previous close, two decimals
    pub change_percent: f64,
    pub volume: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub timestamp: DateTime<Utc>,
    pub is_trading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MarketData {
    /// Placeholder used outside trading hours or when the index is unreachable.
    pub fn closed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: 0.0,
            change: 0.0,
            change_percent: 0.0,
            volume: 0.0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            timestamp: Utc::now(),
            is_trading: false,
            note: Some("market closed or unavailable".to_string()),
        }
    }
}

// == Domain Sentiments ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSentiments {
    pub tech: Sentiment,
    pub finance: Sentiment,
    pub society: Sentiment,
}

impl DomainSentiments {
    pub fn iter(&self) -> impl Iterator<Item = &Sentiment> {
        [&self.tech, &self.finance, &self.society].into_iter()
    }
}

// == Sentiment Snapshot ==
/// One immutable, fully assembled reading across all tracked domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSnapshot {
    pub generated_at: DateTime<Utc>,
    pub market: MarketData,
    pub sentiment: DomainSentiments,
}

impl SentimentSnapshot {
    pub fn new(market: MarketData, sentiment: DomainSentiments) -> Self {
        Self {
            generated_at: Utc::now(),
            market,
            sentiment,
        }
    }

    /// Synthesized snapshot served when no real data has ever been obtained.
    pub fn neutral_default() -> Self {
        Self::new(
            MarketData::closed(super::MARKET_INDEX_NAME),
            DomainSentiments {
                tech: Sentiment::neutral("default"),
                finance: Sentiment::neutral("default"),
                society: Sentiment::neutral("default"),
            },
        )
    }

    /// True when every domain reading is a placeholder.
    pub fn is_fallback_only(&self) -> bool {
        self.sentiment.iter().all(|s| !s.is_live())
    }
}
