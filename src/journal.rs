//! Journal: analysis plus persistence.
//!
//! Ties a [`SentimentAnalyzer`] to an [`EntryStore`]. A submitted note is
//! analyzed, stamped, prepended to the stored list and saved. Submits on one
//! journal are serialized around the load/save pair so none is lost.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::Result;
use crate::analyzer::SentimentAnalyzer;
use crate::store::EntryStore;
use crate::types::{AnalysisRequest, JournalRecord, WeeklySummary};

/// A journal backed by an entry store.
pub struct Journal<S> {
    analyzer: SentimentAnalyzer,
    store: S,
    write_lock: Mutex<()>,
}

impl<S: EntryStore> Journal<S> {
    pub fn new(analyzer: SentimentAnalyzer, store: S) -> Self {
        Self {
            analyzer,
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn analyzer(&self) -> &SentimentAnalyzer {
        &self.analyzer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Analyze and record a note, stamped with the current time.
    pub async fn submit(&self, text: &str) -> Result<JournalRecord> {
        self.submit_at(text, Utc::now()).await
    }

    /// Analyze and record a note created at `now`.
    ///
    /// # Errors
    /// Validation errors for empty text (nothing is analyzed or stored),
    /// and storage errors from the underlying store.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub async fn submit_at(&self, text: &str, now: DateTime<Utc>) -> Result<JournalRecord> {
        let request = AnalysisRequest::new(text)?;
        let result = self.analyzer.analyze_request(&request).await;
        let record = JournalRecord::from_analysis(request.text(), result, now);

        {
            let _guard = self.write_lock.lock().await;
            let mut records = self.store.load().await?;
            records.insert(0, record.clone());
            self.store.save(&records).await?;
        }

        info!(id = %record.id, sentiment = %record.sentiment, "entry recorded");
        Ok(record)
    }

    /// Stored records, newest first.
    pub async fn history(&self) -> Result<Vec<JournalRecord>> {
        self.store.load().await
    }

    /// Per-label counts for the seven days ending at `now`.
    pub async fn weekly_summary(&self, now: DateTime<Utc>) -> Result<WeeklySummary> {
        let records = self.store.load().await?;
        Ok(WeeklySummary::from_records(&records, now))
    }
}
