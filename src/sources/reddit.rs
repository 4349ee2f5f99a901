//! Reddit source: hot titles from a mix of news subreddits, scored as society
//! sentiment.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use tracing::warn;

use super::{score_titles, FallbackLevels, SentimentSource};
use crate::analysis::Category;
use crate::error::{AppError, Result};
use crate::models::Sentiment;

/// Mixed on purpose so the reading is not uniformly grim.
const SUBREDDITS: [&str; 3] = ["worldnews", "news", "upliftingnews"];
const POSTS_PER_SUBREDDIT: usize = 15;
const SOURCE: &str = "reddit";
const FALLBACK: FallbackLevels = FallbackLevels::new(0.4, 0.6, 0.4);

pub struct RedditSource {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
}

impl RedditSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn subreddit_titles(&self, subreddit: &str) -> Result<Vec<String>> {
        let listing: Listing = self
            .client
            .get(format!(
                "https://www.reddit.com/r/{}/hot.json?limit={}",
                subreddit, POSTS_PER_SUBREDDIT
            ))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(listing_titles(listing))
    }

    async fn all_titles(&self) -> Result<Vec<String>> {
        let results = join_all(SUBREDDITS.iter().map(|sub| self.subreddit_titles(sub))).await;

        let mut titles = Vec::new();
        let mut failures = 0;
        for (subreddit, result) in SUBREDDITS.iter().zip(results) {
            match result {
                Ok(mut batch) => titles.append(&mut batch),
                Err(err) => {
                    warn!("reddit: r/{} failed: {}", subreddit, err);
                    failures += 1;
                }
            }
        }

        if failures == SUBREDDITS.len() {
            return Err(AppError::Upstream("reddit: every subreddit failed".to_string()));
        }
        Ok(titles)
    }
}

fn listing_titles(listing: Listing) -> Vec<String> {
    listing
        .data
        .children
        .into_iter()
        .map(|child| child.data.title.trim().to_string())
        .filter(|title| !title.is_empty())
        .collect()
}

#[async_trait]
impl SentimentSource for RedditSource {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_sentiment(&self) -> Sentiment {
        let titles = self.all_titles().await;
        score_titles(SOURCE, Category::Society, titles, FALLBACK)
    }
}
