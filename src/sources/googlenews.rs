//! Google News Taiwan RSS source: headline titles scored as society sentiment.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{fetch_text, score_titles, FallbackLevels, SentimentSource};
use crate::analysis::Category;
use crate::error::Result;
use crate::models::Sentiment;

const GOOGLE_NEWS_TW_RSS: &str = "https://news.google.com/rss?hl=zh-TW&gl=TW&ceid=TW:zh-Hant";
const SOURCE: &str = "googlenews";
const FALLBACK: FallbackLevels = FallbackLevels::new(0.4, 0.6, 0.4);

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<title>([^<]+)</title>").expect("valid title regex"));
static PUBLISHER_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*[^-]+$").expect("valid suffix regex"));

pub struct GoogleNewsSource {
    client: reqwest::Client,
}

impl GoogleNewsSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn headline_titles(&self) -> Result<Vec<String>> {
        let xml = fetch_text(self.client.get(GOOGLE_NEWS_TW_RSS)).await?;
        Ok(parse_titles(&xml))
    }
}

/// Extracts item titles, skipping the feed's own titles and stripping the
/// trailing " - Publisher" marker.
fn parse_titles(xml: &str) -> Vec<String> {
    TITLE
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|title| !title.contains("Google 新聞") && !title.contains("焦點新聞"))
        .map(|title| PUBLISHER_SUFFIX.replace(title, "").trim().to_string())
        .filter(|title| !title.is_empty())
        .collect()
}

#[async_trait]
impl SentimentSource for GoogleNewsSource {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_sentiment(&self) -> Sentiment {
        let titles = self.headline_titles().await;
        score_titles(SOURCE, Category::Society, titles, FALLBACK)
    }
}
