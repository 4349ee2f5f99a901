//! TWSE market index source and the market-to-sentiment mapping.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use super::{fetch_text, MarketSource};
use crate::analysis::round3;
use crate::error::{AppError, Result};
use crate::models::{MarketData, Sentiment, MARKET_INDEX_NAME, NEUTRAL_ACTIVITY, NEUTRAL_LEVEL};

const TWSE_INDEX_URL: &str = "https://mis.twse.com.tw/stock/api/getStockInfo.jsp?ex_ch=tse_t00.tw";

/// Typical daily turnover, in the unit TWSE reports (hundred million TWD).
const AVERAGE_VOLUME: f64 = 3000.0;

/// A ±3% move saturates tension or buoyancy.
const FULL_SWING_PERCENT: f64 = 6.0;

pub struct TwseSource {
    client: reqwest::Client,
    url: String,
}

impl TwseSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: TWSE_INDEX_URL.to_string(),
        }
    }

    async fn fetch_index(&self) -> Result<Option<MarketData>> {
        let body = fetch_text(
            self.client
                .get(&self.url)
                .header("Accept", "application/json"),
        )
        .await?;
        parse_index(&body)
    }
}

#[async_trait]
impl MarketSource for TwseSource {
    async fn fetch_market(&self) -> MarketData {
        match self.fetch_index().await {
            Ok(Some(data)) => data,
            // Empty msgArray outside trading hours
            Ok(None) => MarketData::closed(MARKET_INDEX_NAME),
            Err(err) => {
                warn!("twse: fetch failed, using closed-market data: {}", err);
                MarketData::closed(MARKET_INDEX_NAME)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct IndexResponse {
    #[serde(rename = "msgArray", default)]
    msg_array: Vec<IndexQuote>,
}

/// Quote fields arrive as strings; `z` is `-` while the market is closed.
#[derive(Debug, Default, Deserialize)]
struct IndexQuote {
    #[serde(default)]
    z: String,
    #[serde(default)]
    y: String,
    #[serde(default)]
    v: String,
    #[serde(default)]
    o: String,
    #[serde(default)]
    h: String,
    #[serde(default)]
    l: String,
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a TWSE quote payload. `Ok(None)` means no quote was published.
fn parse_index(body: &str) -> Result<Option<MarketData>> {
    let response: IndexResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Upstream(format!("twse: invalid payload: {}", e)))?;

    let Some(quote) = response.msg_array.into_iter().next() else {
        return Ok(None);
    };

    let previous_close = parse_number(&quote.y)
        .filter(|close| *close > 0.0)
        .ok_or_else(|| AppError::Upstream("twse: missing previous close".to_string()))?;
    let price = parse_number(&quote.z).unwrap_or(previous_close);
    let change = price - previous_close;
    let change_percent = (change / previous_close * 10_000.0).round() / 100.0;

    Ok(Some(MarketData {
        name: MARKET_INDEX_NAME.to_string(),
        price,
        change,
        change_percent,
        volume: parse_number(&quote.v).unwrap_or(0.0),
        open: parse_number(&quote.o).unwrap_or(previous_close),
        high: parse_number(&quote.h).unwrap_or(price),
        low: parse_number(&quote.l).unwrap_or(price),
        timestamp: Utc::now(),
        is_trading: quote.z.trim() != "-",
        note: None,
    }))
}

/// Maps an index reading onto the finance sentiment.
///
/// Outside trading hours the reading is neutral and marked as fallback.
pub fn market_to_sentiment(market: &MarketData) -> Sentiment {
    const SOURCE: &str = "twse";

    if !market.is_trading {
        return Sentiment::fallback(SOURCE, NEUTRAL_LEVEL, NEUTRAL_LEVEL, NEUTRAL_ACTIVITY);
    }

    let shift = market.change_percent / FULL_SWING_PERCENT;
    let tension = (NEUTRAL_LEVEL - shift).clamp(0.0, 1.0);
    let buoyancy = (NEUTRAL_LEVEL + shift).clamp(0.0, 1.0);
    let activity = (market.volume / AVERAGE_VOLUME).clamp(0.2, 1.0);

    Sentiment::live(SOURCE, round3(tension), round3(buoyancy), round3(activity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentStatus;

    fn trading(change_percent: f64, volume: f64) -> MarketData {
        MarketData {
            change_percent,
            volume,
            is_trading: true,
            note: None,
            ..MarketData::closed(MARKET_INDEX_NAME)
        }
    }

    #[test]
    fn test_parse_index_trading() {
        let body = r#"{"msgArray":[{"z":"23100.50","y":"23000.00","v":"2800","o":"23010.00","h":"23150.00","l":"22990.00"}]}"#;
        let data = parse_index(body).unwrap().unwrap();

        assert!(data.is_trading);
        assert_eq!(data.price, 23100.5);
        assert!((data.change - 100.5).abs() < 1e-9);
        assert_eq!(data.change_percent, 0.44);
        assert_eq!(data.volume, 2800.0);
        assert_eq!(data.high, 23150.0);
    }

    #[test]
    fn test_parse_index_closed_uses_previous_close() {
        let body = r#"{"msgArray":[{"z":"-","y":"23000.00","v":"-","o":"-","h":"-","l":"-"}]}"#;
        let data = parse_index(body).unwrap().unwrap();

        assert!(!data.is_trading);
        assert_eq!(data.price, 23000.0);
        assert_eq!(data.change_percent, 0.0);
        assert_eq!(data.volume, 0.0);
    }

    #[test]
    fn test_parse_index_empty_array() {
        assert!(parse_index(r#"{"msgArray":[]}"#).unwrap().is_none());
        assert!(parse_index(r#"{}"#).unwrap().is_none());
    }

    #[test]
    fn test_parse_index_rejects_garbage() {
        assert!(parse_index("<html>busy</html>").is_err());
        assert!(parse_index(r#"{"msgArray":[{"z":"1","y":"0"}]}"#).is_err());
    }

    #[test]
    fn test_market_closed_is_neutral() {
        let sentiment = market_to_sentiment(&MarketData::closed(MARKET_INDEX_NAME));
        assert_eq!(sentiment.tension, 0.5);
        assert_eq!(sentiment.buoyancy, 0.5);
        assert_eq!(sentiment.activity, 0.3);
        assert_eq!(sentiment.status, SentimentStatus::Fallback);
    }

    #[test]
    fn test_market_rally_raises_buoyancy() {
        let sentiment = market_to_sentiment(&trading(1.5, 3000.0));
        assert_eq!(sentiment.tension, 0.25);
        assert_eq!(sentiment.buoyancy, 0.75);
        assert_eq!(sentiment.activity, 1.0);
        assert_eq!(sentiment.status, SentimentStatus::Live);
    }

    #[test]
    fn test_market_crash_saturates() {
        let sentiment = market_to_sentiment(&trading(-4.0, 100.0));
        assert_eq!(sentiment.tension, 1.0);
        assert_eq!(sentiment.buoyancy, 0.0);
        assert_eq!(sentiment.activity, 0.2);
    }
}
