//! Analysis request and result types.

use serde::{Deserialize, Serialize};

use super::SentimentLabel;
use crate::{MoodlogError, Result};

/// A validated analysis request.
///
/// Holds the trimmed input text; construction fails on empty or
/// whitespace-only input so no request is ever issued for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: String,
}

impl AnalysisRequest {
    /// Validate and trim the input text.
    pub fn new(text: impl AsRef<str>) -> Result<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MoodlogError::Validation(
                "entry text must not be empty".to_string(),
            ));
        }
        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    /// The trimmed text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Outcome of analyzing one journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: SentimentLabel,
    pub summary: String,
    pub suggestion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_text() {
        let request = AnalysisRequest::new("  bugün iyiyim \n").unwrap();
        assert_eq!(request.text(), "bugün iyiyim");
    }

    #[test]
    fn request_rejects_blank_text() {
        for text in ["", "   ", "\n\t "] {
            assert!(matches!(
                AnalysisRequest::new(text),
                Err(MoodlogError::Validation(_))
            ));
        }
    }
}
