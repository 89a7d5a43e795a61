//! Weekly aggregate over journal records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{JournalRecord, SentimentLabel};

/// Days before "now" that still count towards the weekly window.
///
/// Six days back plus today gives seven calendar days.
const WINDOW_DAYS: i64 = 6;

/// Per-label counts for the records of the last seven days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl WeeklySummary {
    /// Count records created at or after `now - 6 days`.
    pub fn from_records(records: &[JournalRecord], now: DateTime<Utc>) -> Self {
        let since = now - Duration::days(WINDOW_DAYS);
        records
            .iter()
            .filter(|record| record.created_at >= since)
            .fold(Self::default(), |mut summary, record| {
                summary.total += 1;
                match record.sentiment {
                    SentimentLabel::Positive => summary.positive += 1,
                    SentimentLabel::Neutral => summary.neutral += 1,
                    SentimentLabel::Negative => summary.negative += 1,
                }
                summary
            })
    }

    /// Count for a single label.
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(sentiment: SentimentLabel, created_at: DateTime<Utc>) -> JournalRecord {
        JournalRecord {
            id: created_at.timestamp_millis().to_string(),
            text: "not".into(),
            sentiment,
            summary: String::new(),
            suggestion: String::new(),
            created_at,
        }
    }

    #[test]
    fn counts_only_last_seven_days() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let records = vec![
            record(SentimentLabel::Positive, now),
            record(SentimentLabel::Positive, now - Duration::days(2)),
            record(SentimentLabel::Negative, now - Duration::days(6)),
            record(SentimentLabel::Neutral, now - Duration::days(6) - Duration::minutes(1)),
            record(SentimentLabel::Negative, now - Duration::days(30)),
        ];

        let summary = WeeklySummary::from_records(&records, now);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(SentimentLabel::Positive), 2);
        assert_eq!(summary.count(SentimentLabel::Negative), 1);
        assert_eq!(summary.count(SentimentLabel::Neutral), 0);
    }

    #[test]
    fn empty_when_no_recent_records() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let summary = WeeklySummary::from_records(&[], now);
        assert!(summary.is_empty());
    }
}
