//! Public types for the moodlog API.

mod analysis;
mod record;
mod sentiment;
mod weekly;

pub use analysis::{AnalysisRequest, AnalysisResult};
pub use record::JournalRecord;
pub use sentiment::SentimentLabel;
pub use weekly::WeeklySummary;
