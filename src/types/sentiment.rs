//! The three-way sentiment label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentiment of a journal entry.
///
/// Every analysis resolves to exactly one of these; there is no "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels, in display order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Stable lowercase identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    /// Emoji shown next to an entry.
    pub fn emoji(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "😊",
            SentimentLabel::Neutral => "😐",
            SentimentLabel::Negative => "😔",
        }
    }

    /// Turkish display name used in summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Pozitif",
            SentimentLabel::Neutral => "Nötr",
            SentimentLabel::Negative => "Negatif",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
