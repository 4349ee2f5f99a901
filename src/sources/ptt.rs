//! PTT Gossiping board source: index page titles scored as society sentiment.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{fetch_text, score_titles, FallbackLevels, SentimentSource};
use crate::analysis::Category;
use crate::error::Result;
use crate::models::Sentiment;

const PTT_GOSSIPING_URL: &str = "https://www.ptt.cc/bbs/Gossiping/index.html";
const SOURCE: &str = "ptt";
const FALLBACK: FallbackLevels = FallbackLevels::new(0.4, 0.6, 0.4);

/// Board housekeeping posts carry no sentiment.
const SKIPPED_PREFIXES: [&str; 2] = ["[公告]", "[協尋]"];

static TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div class="title">\s*<a[^>]*>([^<]+)</a>"#).expect("valid title regex")
});

pub struct PttSource {
    client: reqwest::Client,
}

impl PttSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn board_titles(&self) -> Result<Vec<String>> {
        let html = fetch_text(
            self.client
                .get(PTT_GOSSIPING_URL)
                .header("Cookie", "over18=1"),
        )
        .await?;
        Ok(parse_titles(&html))
    }
}

fn parse_titles(html: &str) -> Vec<String> {
    TITLE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
        .filter(|title| !SKIPPED_PREFIXES.iter().any(|p| title.starts_with(p)))
        .collect()
}

#[async_trait]
impl SentimentSource for PttSource {
    fn name(&self) -> &'static str {
        SOURCE
    }

    async fn fetch_sentiment(&self) -> Sentiment {
        let titles = self.board_titles().await;
        score_titles(SOURCE, Category::Society, titles, FALLBACK)
    }
}
