//! Upstream Sources Module
//!
//! Fetchers for the market index and the title feeds. Every fetcher absorbs
//! its own failures: callers always receive a reading, live or fallback.
//!
//! # Sources
//! - TWSE: Taiwan stock exchange index (finance)
//! - Hacker News: top story titles (tech)
//! - Google News TW, Reddit, PTT Gossiping: headline titles (society)

mod googlenews;
mod hackernews;
mod ptt;
mod reddit;
mod twse;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::analysis::{analyze_text, Category};
use crate::error::{AppError, Result};
use crate::models::{MarketData, Sentiment};

pub use googlenews::GoogleNewsSource;
pub use hackernews::HackerNewsSource;
pub use ptt::PttSource;
pub use reddit::RedditSource;
pub use twse::{market_to_sentiment, TwseSource};

const USER_AGENT: &str = "LoomOfSociety/1.0 (Social Sentiment Art Installation)";

// == Source Traits ==
/// A feed producing one domain's sentiment reading.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Never fails; returns a fallback reading when the feed is unavailable.
    async fn fetch_sentiment(&self) -> Sentiment;
}

/// A feed producing raw market index data.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Never fails; returns closed-market data when the index is unavailable.
    async fn fetch_market(&self) -> MarketData;
}

/// Builds the HTTP client shared by every upstream fetcher.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))
}

/// Levels reported by a title feed when it cannot be read.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FallbackLevels {
    pub tension: f64,
    pub buoyancy: f64,
    pub activity: f64,
}

impl FallbackLevels {
    pub const fn new(tension: f64, buoyancy: f64, activity: f64) -> Self {
        Self {
            tension,
            buoyancy,
            activity,
        }
    }

    fn into_sentiment(self, source: &str) -> Sentiment {
        Sentiment::fallback(source, self.tension, self.buoyancy, self.activity).with_item_count(0)
    }
}

/// Scores fetched titles, or substitutes the source's fallback reading.
pub(crate) fn score_titles(
    source: &'static str,
    category: Category,
    titles: Result<Vec<String>>,
    fallback: FallbackLevels,
) -> Sentiment {
    match titles {
        Ok(titles) if !titles.is_empty() => {
            let score = analyze_text(&titles.join(" "), category);
            debug!("{}: scored {} titles", source, titles.len());
            Sentiment::live(source, score.tension, score.buoyancy, score.activity)
                .with_item_count(titles.len())
        }
        Ok(_) => {
            warn!("{}: no titles found, using fallback", source);
            fallback.into_sentiment(source)
        }
        Err(err) => {
            warn!("{}: fetch failed, using fallback: {}", source, err);
            fallback.into_sentiment(source)
        }
    }
}

/// Sends `request` and returns the body, treating non-success statuses as errors.
pub(crate) async fn fetch_text(request: reqwest::RequestBuilder) -> Result<String> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Upstream(format!("HTTP {}", status)));
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentStatus;

    const FALLBACK: FallbackLevels = FallbackLevels::new(0.4, 0.6, 0.4);

    #[test]
    fn test_score_titles_live() {
        let titles = Ok(vec![
            "Rescue teams saved dozens".to_string(),
            "Peace talks show progress".to_string(),
        ]);
        let sentiment = score_titles("googlenews", Category::Society, titles, FALLBACK);

        assert_eq!(sentiment.status, SentimentStatus::Live);
        assert_eq!(sentiment.item_count, Some(2));
        assert!(sentiment.buoyancy > 0.5);
    }

    #[test]
    fn test_score_titles_empty_uses_fallback() {
        let sentiment = score_titles("reddit", Category::Society, Ok(vec![]), FALLBACK);

        assert_eq!(sentiment.status, SentimentStatus::Fallback);
        assert_eq!(sentiment.tension, 0.4);
        assert_eq!(sentiment.buoyancy, 0.6);
        assert_eq!(sentiment.item_count, Some(0));
    }

    #[test]
    fn test_score_titles_error_uses_fallback() {
        let titles = Err(AppError::Upstream("HTTP 503".to_string()));
        let sentiment = score_titles("ptt", Category::Society, titles, FALLBACK);

        assert_eq!(sentiment.status, SentimentStatus::Fallback);
        assert_eq!(sentiment.source, "ptt");
    }

    #[test]
    fn test_http_client_builds() {
        assert!(http_client(Duration::from_secs(5)).is_ok());
    }
}
