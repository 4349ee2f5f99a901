//! Request DTOs for the sentiment server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::analysis::Category;

/// Longest text accepted by `POST /api/analyze`, in characters.
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Request body for the analyze operation (POST /api/analyze)
///
/// # Fields
/// - `text`: The text to score
/// - `category`: Keyword set to score against (default: `society`)
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// The text to score
    #[serde(default)]
    pub text: String,
    /// `tech`, `finance` or `society`
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "society".to_string()
}

impl AnalyzeRequest {
    /// Validates the request data
    ///
    /// Returns the category to score against, or an error message if
    /// validation fails. Whitespace-only text is accepted and scores neutral.
    pub fn validate(&self) -> Result<Category, String> {
        if self.text.is_empty() {
            return Err("Text must be a non-empty string".to_string());
        }
        if self.text.chars().count() > MAX_TEXT_LENGTH {
            return Err(format!(
                "Text too long (max {} characters)",
                MAX_TEXT_LENGTH
            ));
        }
        self.category.parse::<Category>().map_err(|_| {
            format!(
                "Invalid category. Must be one of: {}",
                Category::NAMES.join(", ")
            )
        })
    }
}
