//! Aggregator Module
//!
//! Fans out to every upstream source concurrently and merges the readings
//! into one [`SentimentSnapshot`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::{Config, SocietySource};
use crate::error::Result;
use crate::models::{DomainSentiments, SentimentSnapshot};
use crate::sources::{
    http_client, market_to_sentiment, GoogleNewsSource, HackerNewsSource, MarketSource,
    PttSource, RedditSource, SentimentSource, TwseSource,
};

// == Snapshot Provider ==
/// Produces fresh snapshots on demand for the cache.
///
/// May take as long as the slowest upstream. An `Err` means the whole
/// refresh failed; partial upstream failures are expressed as fallback
/// readings inside an `Ok` snapshot.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn fetch_fresh_snapshot(&self) -> Result<SentimentSnapshot>;
}

// == Aggregator ==
pub struct Aggregator {
    market: Arc<dyn MarketSource>,
    tech: Arc<dyn SentimentSource>,
    society: Arc<dyn SentimentSource>,
}

impl Aggregator {
    pub fn new(
        market: Arc<dyn MarketSource>,
        tech: Arc<dyn SentimentSource>,
        society: Arc<dyn SentimentSource>,
    ) -> Self {
        Self {
            market,
            tech,
            society,
        }
    }

    /// Wires the live upstream sources selected by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client(config.upstream_timeout())?;

        let society: Arc<dyn SentimentSource> = match config.society_source {
            SocietySource::GoogleNews => Arc::new(GoogleNewsSource::new(client.clone())),
            SocietySource::Reddit => Arc::new(RedditSource::new(client.clone())),
            SocietySource::Ptt => Arc::new(PttSource::new(client.clone())),
        };
        info!("Society sentiment source: {}", society.name());

        Ok(Self::new(
            Arc::new(TwseSource::new(client.clone())),
            Arc::new(HackerNewsSource::new(client)),
            society,
        ))
    }
}

#[async_trait]
impl SnapshotProvider for Aggregator {
    async fn fetch_fresh_snapshot(&self) -> Result<SentimentSnapshot> {
        // Sources absorb their own failures, so every branch settles.
        let (market, tech, society) = tokio::join!(
            self.market.fetch_market(),
            self.tech.fetch_sentiment(),
            self.society.fetch_sentiment(),
        );

        let finance = market_to_sentiment(&market);
        let snapshot = SentimentSnapshot::new(
            market,
            DomainSentiments {
                tech,
                finance,
                society,
            },
        );

        debug!(
            "Aggregated snapshot: tech={:?} finance={:?} society={:?}",
            snapshot.sentiment.tech.status,
            snapshot.sentiment.finance.status,
            snapshot.sentiment.society.status
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MarketData, Sentiment, SentimentStatus, MARKET_INDEX_NAME};
    use std::time::Duration;

    struct FixedMarket(MarketData);

    #[async_trait]
    impl MarketSource for FixedMarket {
        async fn fetch_market(&self) -> MarketData {
            self.0.clone()
        }
    }

    struct SlowSource {
        sentiment: Sentiment,
        delay: Duration,
    }

    #[async_trait]
    impl SentimentSource for SlowSource {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn fetch_sentiment(&self) -> Sentiment {
            tokio::time::sleep(self.delay).await;
            self.sentiment.clone()
        }
    }

    fn trading_market() -> MarketData {
        MarketData {
            change_percent: -1.2,
            volume: 1500.0,
            is_trading: true,
            note: None,
            ..MarketData::closed(MARKET_INDEX_NAME)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sources_fetched_concurrently() {
        let aggregator = Aggregator::new(
            Arc::new(FixedMarket(trading_market())),
            Arc::new(SlowSource {
                sentiment: Sentiment::live("hackernews", 0.3, 0.7, 0.6),
                delay: Duration::from_secs(3),
            }),
            Arc::new(SlowSource {
                sentiment: Sentiment::live("googlenews", 0.6, 0.4, 0.5),
                delay: Duration::from_secs(3),
            }),
        );

        let start = tokio::time::Instant::now();
        let snapshot = aggregator.fetch_fresh_snapshot().await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(3));
        assert_eq!(snapshot.sentiment.tech.source, "hackernews");
        assert_eq!(snapshot.sentiment.society.source, "googlenews");
    }

    #[tokio::test]
    async fn test_finance_derived_from_market() {
        let aggregator = Aggregator::new(
            Arc::new(FixedMarket(trading_market())),
            Arc::new(SlowSource {
                sentiment: Sentiment::live("hackernews", 0.3, 0.7, 0.6),
                delay: Duration::ZERO,
            }),
            Arc::new(SlowSource {
                sentiment: Sentiment::live("googlenews", 0.6, 0.4, 0.5),
                delay: Duration::ZERO,
            }),
        );

        let snapshot = aggregator.fetch_fresh_snapshot().await.unwrap();
        let finance = &snapshot.sentiment.finance;

        assert_eq!(finance.source, "twse");
        assert_eq!(finance.status, SentimentStatus::Live);
        assert_eq!(finance.tension, 0.7);
        assert_eq!(finance.buoyancy, 0.3);
        assert_eq!(finance.activity, 0.5);
        assert!(snapshot.market.is_trading);
    }

    #[tokio::test]
    async fn test_partial_failure_mixes_live_and_fallback() {
        let aggregator = Aggregator::new(
            Arc::new(FixedMarket(MarketData::closed(MARKET_INDEX_NAME))),
            Arc::new(SlowSource {
                sentiment: Sentiment::live("hackernews", 0.3, 0.7, 0.6),
                delay: Duration::ZERO,
            }),
            Arc::new(SlowSource {
                sentiment: Sentiment::fallback("googlenews", 0.4, 0.6, 0.4),
                delay: Duration::ZERO,
            }),
        );

        let snapshot = aggregator.fetch_fresh_snapshot().await.unwrap();

        assert!(snapshot.sentiment.tech.is_live());
        assert!(!snapshot.sentiment.finance.is_live());
        assert!(!snapshot.sentiment.society.is_live());
        assert!(!snapshot.is_fallback_only());
    }

    #[test]
    fn test_from_config_builds_each_society_source() {
        for source in [SocietySource::GoogleNews, SocietySource::Reddit, SocietySource::Ptt] {
            let config = Config {
                society_source: source,
                ..Config::default()
            };
            assert!(Aggregator::from_config(&config).is_ok());
        }
    }
}
