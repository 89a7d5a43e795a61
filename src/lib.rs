//! moodlog - journaling core with hosted sentiment inference
//!
//! This crate analyzes free-text journal entries. Each entry is sent to a
//! hosted HuggingFace sentiment model; when that fails, alternate models are
//! tried in order, and when every hosted model fails an offline keyword
//! classifier decides. The result carries a three-way sentiment, a short
//! summary and a fixed suggestion, and can be persisted as a journal record.
//!
//! # Analysis Example
//!
//! ```rust,no_run
//! use moodlog::SentimentAnalyzer;
//!
//! #[tokio::main]
//! async fn main() -> moodlog::Result<()> {
//!     let analyzer = SentimentAnalyzer::builder()
//!         .huggingface("hf_your_key")
//!         .build()?;
//!
//!     let result = analyzer.analyze("Bugün çok mutlu ve enerjik hissediyorum").await?;
//!
//!     println!("{} {}", result.sentiment.emoji(), result.summary);
//!     println!("{}", result.suggestion);
//!     Ok(())
//! }
//! ```
//!
//! # Journal Example
//!
//! ```rust,no_run
//! use moodlog::{Journal, JsonFileStore, SentimentAnalyzer};
//!
//! #[tokio::main]
//! async fn main() -> moodlog::Result<()> {
//!     let analyzer = SentimentAnalyzer::builder().build()?;
//!     let journal = Journal::new(analyzer, JsonFileStore::new("entries.json"));
//!
//!     let record = journal.submit("Yorgun ama umutluyum").await?;
//!     println!("saved {} as {}", record.id, record.sentiment);
//!
//!     let week = journal.weekly_summary(chrono::Utc::now()).await?;
//!     println!("{} entries this week", week.total);
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod journal;
pub mod normalize;
pub mod providers;
pub mod store;
pub mod telemetry;
pub mod types;
mod version;

pub use version::{
    GIT_BRANCH, GIT_SHA, PKG_VERSION, built_from_checkout, git_dirty, short_sha, version_string,
};

// Re-export main types at crate root
pub use analyzer::{AnalyzerBuilder, SentimentAnalyzer, Tier, suggestion_for};
pub use config::{Config, Secrets};
pub use error::{MoodlogError, Result};
pub use journal::Journal;
pub use providers::{FallbackChain, HuggingFaceClient, InferenceProvider, RetryPolicy};
pub use store::{EntryStore, JsonFileStore, MemoryStore};

// Re-export all types
pub use types::{AnalysisRequest, AnalysisResult, JournalRecord, SentimentLabel, WeeklySummary};
