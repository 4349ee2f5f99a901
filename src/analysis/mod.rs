//! Analysis Module
//!
//! Keyword-count sentiment scoring used by the text-based upstream sources
//! and by `POST /api/analyze`.

mod keywords;
mod scorer;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::Serialize;

pub use scorer::{analyze_text, round3, safe_normalize, TextScore};

// == Category ==
/// Keyword set a text is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tech,
    Finance,
    Society,
}

impl Category {
    pub const NAMES: [&'static str; 3] = ["tech", "finance", "society"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Finance => "finance",
            Category::Society => "society",
        }
    }

    pub(crate) fn keywords(&self) -> &'static KeywordSet {
        match self {
            Category::Tech => &TECH,
            Category::Finance => &FINANCE,
            Category::Society => &SOCIETY,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tech" => Ok(Category::Tech),
            "finance" => Ok(Category::Finance),
            "society" => Ok(Category::Society),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

// == Keyword Set ==
/// Lowercased keyword lists, built once.
pub(crate) struct KeywordSet {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl KeywordSet {
    fn new(positive: &[&str], negative: &[&str]) -> Self {
        Self {
            positive: positive.iter().map(|w| w.to_lowercase()).collect(),
            negative: negative.iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

static TECH: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(keywords::TECH_POSITIVE, keywords::TECH_NEGATIVE));
static FINANCE: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(keywords::FINANCE_POSITIVE, keywords::FINANCE_NEGATIVE));
static SOCIETY: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(keywords::SOCIETY_POSITIVE, keywords::SOCIETY_NEGATIVE));
