//! Hacker News source: top story titles scored as tech sentiment.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;

use super::{score_titles, FallbackLevels, SentimentSource};
use crate::analysis::Category;
use crate::error::Result;
use crate::models::Sentiment;

const HN_API: &str = "https://hacker-news.firebaseio.com/v0";
const SOURCE: &str = "hackernews";
const FALLBACK: FallbackLevels = FallbackLevels::new(0.4, 0.6, 0.5);

pub struct HackerNewsSource {
    client: reqwest::Client,
    story_limit: usize,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
}

impl HackerNewsSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            story_limit: 30,
        }
    }

    async fn top_story_titles(&self) -> Result<Vec<String>> {
        let ids: Vec<u64> = self
            .client
            .get(format!("{}/topstories.json", HN_API))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let items = ids
            .into_iter()
            .take(self.story_limit)
            .map(|id| self.story_title(id));

        // A missing story only drops its title
        Ok(join_all(items).await.into_iter().flatten().collect())
    }

    async fn story_title(&self, id: u64) -> Option<String> {
        let response = self
            .client
            .get(format!("{}/item/{}.json", HN_API, id))
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;
        let item: Option<Item> = response.json().await.ok()?;
        item.and_then(|item| item.title)
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
    }
}

#[async_trait]
impl SentimentSource for HackerNewsSource {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_sentiment(&self) -> Sentiment {
        let titles = self.top_story_titles().await;
        score_titles(SOURCE, Category::Tech, titles, FALLBACK)
    }
}
