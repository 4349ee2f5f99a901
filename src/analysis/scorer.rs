//! Keyword Scorer
//!
//! Counts positive and negative keyword occurrences and maps the balance
//! onto tension/buoyancy/activity levels.

use super::Category;
use crate::models::{NEUTRAL_ACTIVITY, NEUTRAL_LEVEL};

/// Largest swing away from the midpoint a fully one-sided text produces.
const SWING: f64 = 0.4;

// == Text Score ==
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextScore {
    pub tension: f64,
    pub buoyancy: f64,
    pub activity: f64,
    pub positive_count: usize,
    pub negative_count: usize,
}

impl TextScore {
    fn neutral(activity: f64) -> Self {
        Self {
            tension: NEUTRAL_LEVEL,
            buoyancy: NEUTRAL_LEVEL,
            activity,
            positive_count: 0,
            negative_count: 0,
        }
    }
}

/// Scores `text` against the keyword lists of `category`.
///
/// Matching is case-insensitive and counts every non-overlapping occurrence
/// of each keyword, so a keyword embedded in a longer word still counts.
pub fn analyze_text(text: &str, category: Category) -> TextScore {
    if text.trim().is_empty() {
        return TextScore::neutral(NEUTRAL_ACTIVITY);
    }

    let haystack = text.to_lowercase();
    let keywords = category.keywords();
    let positive_count = count_occurrences(&haystack, &keywords.positive);
    let negative_count = count_occurrences(&haystack, &keywords.negative);
    let total = positive_count + negative_count;

    let length = text.chars().count() as f64;
    let density = total as f64 / (length / 100.0).max(1.0);
    let activity = round3(safe_normalize(density * 0.5 + 0.3, 0.0, 1.0, NEUTRAL_ACTIVITY));

    if total == 0 {
        return TextScore::neutral(activity);
    }

    let balance = (positive_count as f64 - negative_count as f64) / total as f64;
    let tension = safe_normalize(NEUTRAL_LEVEL - balance * SWING, 0.1, 0.9, NEUTRAL_LEVEL);
    let buoyancy = safe_normalize(NEUTRAL_LEVEL + balance * SWING, 0.1, 0.9, NEUTRAL_LEVEL);

    TextScore {
        tension: round3(tension),
        buoyancy: round3(buoyancy),
        activity,
        positive_count,
        negative_count,
    }
}

fn count_occurrences(haystack: &str, needles: &[String]) -> usize {
    needles
        .iter()
        .map(|needle| haystack.matches(needle.as_str()).count())
        .sum()
}

/// Clamps `value` into `[min, max]`, substituting `fallback` for NaN or infinities.
pub fn safe_normalize(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, max)
}

/// Rounds to three decimals.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
