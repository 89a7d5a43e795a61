//! Persisted journal records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnalysisResult, SentimentLabel};

/// A journal entry together with its analysis.
///
/// Serialized with the `createdAt` key used by the app's stored format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub id: String,
    pub text: String,
    pub sentiment: SentimentLabel,
    pub summary: String,
    pub suggestion: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl JournalRecord {
    /// Build a record from an analysis result, stamped at `created_at`.
    ///
    /// The id is the creation time in milliseconds.
    pub fn from_analysis(
        text: impl Into<String>,
        result: AnalysisResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: created_at.timestamp_millis().to_string(),
            text: text.into(),
            sentiment: result.sentiment,
            summary: result.summary,
            suggestion: result.suggestion,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_uses_millis_id_and_created_at_key() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let record = JournalRecord::from_analysis(
            "sabah koşusu",
            AnalysisResult {
                sentiment: SentimentLabel::Positive,
                summary: "Duygu analizi: pozitif".into(),
                suggestion: "tebrikler".into(),
            },
            at,
        );
        assert_eq!(record.id, at.timestamp_millis().to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["createdAt"], "2025-03-01T09:30:00Z");
        assert_eq!(json["sentiment"], "positive");
    }

    #[test]
    fn parses_app_stored_format() {
        let json = r#"{
            "id": "1700000000000",
            "text": "yorgun bir gün",
            "sentiment": "negative",
            "summary": "yorgun bir gün",
            "suggestion": "dinlen",
            "createdAt": "2023-11-14T22:13:20.000Z"
        }"#;
        let record: JournalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sentiment, SentimentLabel::Negative);
        assert_eq!(record.created_at.timestamp_millis(), 1_700_000_000_000);
    }
}
