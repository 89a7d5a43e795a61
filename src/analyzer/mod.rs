//! Sentiment analysis orchestration.
//!
//! [`SentimentAnalyzer::analyze`] turns one journal entry into an
//! [`AnalysisResult`]. Sentiment is resolved through three tiers:
//!
//! ```text
//! primary model ──fail──► fallback chain ──fail──► keyword heuristic
//!  (binary rule)          (emotion rule)           (never fails)
//! ```
//!
//! The summary comes from a second, independent call to the primary model
//! and degrades to a preview of the text. Both resolutions run concurrently
//! and neither can affect the other.

mod builder;

pub use builder::AnalyzerBuilder;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::{Config, Secrets};
use crate::heuristic;
use crate::normalize;
use crate::providers::{FallbackChain, InferenceProvider};
use crate::telemetry;
use crate::types::{AnalysisRequest, AnalysisResult, SentimentLabel};
use crate::Result;

/// Primary binary sentiment model.
pub const DEFAULT_PRIMARY_MODEL: &str =
    "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

/// Characters of the entry kept when the summary falls back to a preview.
const PREVIEW_CHARS: usize = 60;

/// Tier that produced a sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Fallback,
    Heuristic,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Fallback => "fallback",
            Tier::Heuristic => "heuristic",
        }
    }
}

/// Resolves sentiment, summary and suggestion for journal entries.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct SentimentAnalyzer {
    provider: Arc<dyn InferenceProvider>,
    primary_model: String,
    fallback: FallbackChain,
}

impl SentimentAnalyzer {
    /// Create a builder for configuring the analyzer.
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Assemble an analyzer from its parts.
    pub fn new(
        provider: Arc<dyn InferenceProvider>,
        primary_model: impl Into<String>,
        fallback: FallbackChain,
    ) -> Self {
        Self {
            provider,
            primary_model: primary_model.into(),
            fallback,
        }
    }

    /// Build an analyzer from loaded configuration and secrets.
    pub fn from_config(config: &Config, secrets: &Secrets) -> Result<Self> {
        AnalyzerBuilder::from_config(config, secrets).build()
    }

    pub fn primary_model(&self) -> &str {
        &self.primary_model
    }

    pub fn fallback(&self) -> &FallbackChain {
        &self.fallback
    }

    /// Analyze one journal entry.
    ///
    /// # Errors
    /// Only [`MoodlogError::Validation`](crate::MoodlogError::Validation)
    /// for empty or whitespace-only text; nothing is sent in that case.
    /// Network and parse failures are absorbed by the tier fallback.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let request = AnalysisRequest::new(text)?;
        Ok(self.analyze_request(&request).await)
    }

    /// Analyze an already validated request.
    pub async fn analyze_request(&self, request: &AnalysisRequest) -> AnalysisResult {
        let ((sentiment, _), summary) = tokio::join!(
            self.resolve_sentiment(request),
            self.resolve_summary(request)
        );
        AnalysisResult {
            sentiment,
            summary,
            suggestion: suggestion_for(sentiment).to_string(),
        }
    }

    /// Resolve the sentiment label, reporting which tier produced it.
    pub async fn resolve_sentiment(&self, request: &AnalysisRequest) -> (SentimentLabel, Tier) {
        let text = request.text();

        let (label, tier) = match self.primary_sentiment(text).await {
            Ok(label) => (label, Tier::Primary),
            Err(e) => {
                warn!(model = %self.primary_model, error = %e, "primary sentiment tier failed");
                match self.fallback_sentiment(text).await {
                    Ok(label) => (label, Tier::Fallback),
                    Err(e) => {
                        warn!(error = %e, "fallback sentiment tier failed, using keyword heuristic");
                        (heuristic::classify(text), Tier::Heuristic)
                    }
                }
            }
        };

        metrics::counter!(telemetry::SENTIMENT_TIER_TOTAL, "tier" => tier.as_str()).increment(1);
        info!(sentiment = %label, tier = tier.as_str(), "sentiment resolved");
        (label, tier)
    }

    /// Resolve the summary line, falling back to a preview of the text.
    pub async fn resolve_summary(&self, request: &AnalysisRequest) -> String {
        let text = request.text();
        match self.primary_summary(text).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(model = %self.primary_model, error = %e, "summary unavailable, using preview");
                preview(text)
            }
        }
    }

    async fn primary_sentiment(&self, text: &str) -> Result<SentimentLabel> {
        let value = self.provider.infer(&self.primary_model, text, None).await?;
        normalize::binary_sentiment(&value)
    }

    async fn fallback_sentiment(&self, text: &str) -> Result<SentimentLabel> {
        let value = self.fallback.infer(self.provider.as_ref(), text, None).await?;
        normalize::emotion_sentiment(&value)
    }

    async fn primary_summary(&self, text: &str) -> Result<String> {
        let value = self.provider.infer(&self.primary_model, text, None).await?;
        normalize::summarize(&value)
    }
}

/// Fixed suggestion for each sentiment.
pub fn suggestion_for(sentiment: SentimentLabel) -> &'static str {
    match sentiment {
        SentimentLabel::Positive => {
            "Harika! Bu motivasyonu korumak için gün içinde kısa bir kutlama yap."
        }
        SentimentLabel::Negative => {
            "Bugün kendine karşı nazik ol. 10 dakikalık nefes egzersizi iyi gelebilir."
        }
        SentimentLabel::Neutral => {
            "Dengeli bir gün. Bir fincan çay eşliğinde duygularını gözlemlemeyi deneyebilirsin."
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`, with `...` when cut.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
