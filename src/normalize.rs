//! Normalization of heterogeneous classification responses.
//!
//! Hosted models disagree on response shape. A binary SST-2 model answers
//! `[[{label, score}, …]]`, some endpoints answer `[{label, score}]`, others a
//! bare `{label, score}`. [`ResponseShape::decode`] recognizes each of these
//! and yields a [`ScoreSummary`]; the decision rules below only see that
//! intermediate value.
//!
//! Two decision rules exist:
//!
//! - [`binary_sentiment`] for the primary positive/negative model, which
//!   flattens anything at or below [`CONFIDENCE_THRESHOLD`] to neutral.
//! - [`emotion_sentiment`] for the fallback sentiment/emotion models, which
//!   map emotion classes onto polarity.

use serde_json::Value;

use crate::types::SentimentLabel;
use crate::{MoodlogError, Result};

/// Scores at or below this are reported as neutral by the primary tier.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Fallback-tier scores strictly below this (and above zero) are neutral.
pub const WEAK_PREDICTION_THRESHOLD: f64 = 0.5;

/// Summary line prefix ("sentiment analysis" in the app's locale).
const SUMMARY_PREFIX: &str = "Duygu analizi";

const POSITIVE_EMOTIONS: [&str; 3] = ["joy", "love", "optimism"];
const NEGATIVE_EMOTIONS: [&str; 4] = ["sadness", "anger", "fear", "disgust"];

/// Longest slice of an unrecognized body quoted in a parse error.
const MAX_PREVIEW_CHARS: usize = 200;

/// One `{label, score}` prediction.
///
/// Both fields are optional in the wire format; an empty label counts as
/// absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Option<String>,
    pub score: Option<f64>,
}

impl Prediction {
    /// Read a prediction out of a JSON object; non-objects yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            label: object
                .get("label")
                .and_then(Value::as_str)
                .filter(|label| !label.is_empty())
                .map(str::to_string),
            score: object.get("score").and_then(Value::as_f64),
        })
    }

    fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

/// Known response shapes, tried in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// `[[{label, score}, …]]` — full distribution from a binary model.
    Nested(Vec<Prediction>),
    /// `[{label, score}, …]` — only the first element is considered.
    FirstItem(Prediction),
    /// `{label, score}`.
    Flat(Prediction),
}

impl ResponseShape {
    /// Recognize the shape of a raw response.
    pub fn decode(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => match items.first()? {
                Value::Array(pairs) => Some(Self::Nested(
                    pairs.iter().filter_map(Prediction::from_value).collect(),
                )),
                first => Prediction::from_value(first).map(Self::FirstItem),
            },
            Value::Object(_) => Prediction::from_value(value).map(Self::Flat),
            _ => None,
        }
    }

    /// Positive/negative scores and the bare label, if any.
    ///
    /// For [`Nested`](Self::Nested) every pair is scanned and no bare label
    /// is kept; a later pair of the same polarity overwrites an earlier one.
    pub fn scores(&self) -> ScoreSummary {
        let mut summary = ScoreSummary::default();
        match self {
            Self::Nested(pairs) => {
                for pair in pairs {
                    if let Some(label) = &pair.label {
                        summary.assign(label, pair.score_or_zero());
                    }
                }
            }
            Self::FirstItem(prediction) | Self::Flat(prediction) => {
                summary.score = prediction.score_or_zero();
                if let Some(label) = &prediction.label {
                    summary.assign(label, summary.score);
                    summary.label = Some(label.clone());
                }
            }
        }
        summary
    }

    /// The single prediction a classifier settled on.
    ///
    /// For a full distribution this is the highest-scoring labelled pair.
    pub fn top(&self) -> Option<&Prediction> {
        match self {
            Self::Nested(pairs) => pairs
                .iter()
                .filter(|pair| pair.label.is_some())
                .max_by(|a, b| a.score_or_zero().total_cmp(&b.score_or_zero())),
            Self::FirstItem(prediction) | Self::Flat(prediction) => Some(prediction),
        }
    }
}

/// Intermediate result of decoding a response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSummary {
    /// Confidence in the positive class; 0 when not reported.
    pub positive: f64,
    /// Confidence in the negative class; 0 when not reported.
    pub negative: f64,
    /// Bare label of a single prediction.
    pub label: Option<String>,
    /// Score of a single prediction.
    pub score: f64,
}

impl ScoreSummary {
    fn assign(&mut self, label: &str, score: f64) {
        let upper = label.to_uppercase();
        if upper.contains("POS") {
            self.positive = score;
        } else if upper.contains("NEG") {
            self.negative = score;
        }
    }

    fn has_scores(&self) -> bool {
        self.positive > 0.0 || self.negative > 0.0
    }

    /// Apply the primary-tier decision rule.
    ///
    /// A known score decides when it exceeds [`CONFIDENCE_THRESHOLD`];
    /// weaker scores are neutral. Without scores a bare label is mapped by
    /// substring. `None` when there is nothing to decide on.
    pub fn decide(&self) -> Option<SentimentLabel> {
        if self.has_scores() {
            let max = self.positive.max(self.negative);
            if max > CONFIDENCE_THRESHOLD {
                return Some(if self.positive > self.negative {
                    SentimentLabel::Positive
                } else {
                    SentimentLabel::Negative
                });
            }
            return Some(SentimentLabel::Neutral);
        }
        self.label.as_deref().map(map_label)
    }
}

/// Generic substring classifier for arbitrary labels.
pub fn map_label(label: &str) -> SentimentLabel {
    let lower = label.to_lowercase();
    if lower.contains("pos") {
        SentimentLabel::Positive
    } else if lower.contains("neg") {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Map a fallback-tier label and its score onto a sentiment.
///
/// Emotion classes map directly. Other labels go through [`map_label`],
/// but a weak prediction (score in `(0, 0.5)`) is neutral.
pub fn emotion_label(label: &str, score: f64) -> SentimentLabel {
    let lower = label.to_lowercase();
    if POSITIVE_EMOTIONS.contains(&lower.as_str()) {
        return SentimentLabel::Positive;
    }
    if NEGATIVE_EMOTIONS.contains(&lower.as_str()) {
        return SentimentLabel::Negative;
    }
    if score > 0.0 && score < WEAK_PREDICTION_THRESHOLD {
        return SentimentLabel::Neutral;
    }
    map_label(&lower)
}

/// Resolve the primary (binary) model's response.
pub fn binary_sentiment(value: &Value) -> Result<SentimentLabel> {
    ResponseShape::decode(value)
        .and_then(|shape| shape.scores().decide())
        .ok_or_else(|| unrecognized(value))
}

/// Resolve a fallback (sentiment or emotion) model's response.
pub fn emotion_sentiment(value: &Value) -> Result<SentimentLabel> {
    let shape = ResponseShape::decode(value).ok_or_else(|| unrecognized(value))?;
    let top = shape.top().ok_or_else(|| unrecognized(value))?;
    let label = top.label.as_deref().ok_or_else(|| unrecognized(value))?;
    Ok(emotion_label(label, top.score_or_zero()))
}

/// Human-readable summary line for the primary model's response.
pub fn summarize(value: &Value) -> Result<String> {
    let summary = ResponseShape::decode(value)
        .map(|shape| shape.scores())
        .ok_or_else(|| unrecognized(value))?;

    let polarity = if summary.has_scores() {
        if summary.positive > summary.negative {
            "pozitif"
        } else {
            "negatif"
        }
    } else {
        let label = summary
            .label
            .as_deref()
            .ok_or_else(|| unrecognized(value))?
            .to_lowercase();
        if label.contains("positive") {
            "pozitif"
        } else if label.contains("negative") {
            "negatif"
        } else {
            "nötr"
        }
    };
    Ok(format!("{SUMMARY_PREFIX}: {polarity}"))
}

fn unrecognized(value: &Value) -> MoodlogError {
    let preview: String = value.to_string().chars().take(MAX_PREVIEW_CHARS).collect();
    MoodlogError::Parse(format!("no sentiment scores or label in {preview}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_confident_positive() {
        let value = json!([[
            {"label": "POSITIVE", "score": 0.92},
            {"label": "NEGATIVE", "score": 0.08}
        ]]);
        assert_eq!(binary_sentiment(&value).unwrap(), SentimentLabel::Positive);
    }

    #[test]
    fn nested_confident_negative() {
        let value = json!([[
            {"label": "NEGATIVE", "score": 0.97},
            {"label": "POSITIVE", "score": 0.03}
        ]]);
        assert_eq!(binary_sentiment(&value).unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn nested_below_threshold_is_neutral() {
        let value = json!([[
            {"label": "POSITIVE", "score": 0.55},
            {"label": "NEGATIVE", "score": 0.45}
        ]]);
        assert_eq!(binary_sentiment(&value).unwrap(), SentimentLabel::Neutral);
    }

    #[test]
    fn exactly_threshold_is_neutral() {
        let value = json!([[{"label": "POSITIVE", "score": 0.7}]]);
        assert_eq!(binary_sentiment(&value).unwrap(), SentimentLabel::Neutral);
    }

    #[test]
    fn first_item_and_flat_shapes_are_mapped_alike() {
        let first_item = json!([{"label": "NEGATIVE", "score": 0.88}]);
        let flat = json!({"label": "NEGATIVE", "score": 0.88});
        assert_eq!(
            binary_sentiment(&first_item).unwrap(),
            SentimentLabel::Negative
        );
        assert_eq!(binary_sentiment(&flat).unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn bare_label_without_score_uses_substring_mapping() {
        let value = json!([{"label": "very positive"}]);
        assert_eq!(binary_sentiment(&value).unwrap(), SentimentLabel::Positive);

        let value = json!({"label": "mixed"});
        assert_eq!(binary_sentiment(&value).unwrap(), SentimentLabel::Neutral);
    }

    #[test]
    fn unknown_shapes_are_parse_errors() {
        for value in [
            json!([]),
            json!("POSITIVE"),
            json!(42),
            json!([[{"label": "LABEL_0", "score": 0.9}]]),
            json!({"error": "Model is currently loading"}),
            json!([["POSITIVE", 0.9]]),
        ] {
            assert!(
                matches!(binary_sentiment(&value), Err(MoodlogError::Parse(_))),
                "{value} should not parse"
            );
        }
    }

    #[test]
    fn emotion_classes_map_to_polarity() {
        for (label, expected) in [
            ("joy", SentimentLabel::Positive),
            ("love", SentimentLabel::Positive),
            ("optimism", SentimentLabel::Positive),
            ("sadness", SentimentLabel::Negative),
            ("anger", SentimentLabel::Negative),
            ("fear", SentimentLabel::Negative),
            ("disgust", SentimentLabel::Negative),
            ("surprise", SentimentLabel::Neutral),
        ] {
            let value = json!({"label": label, "score": 0.8});
            assert_eq!(emotion_sentiment(&value).unwrap(), expected, "{label}");
        }
    }

    #[test]
    fn emotion_classes_ignore_weak_scores() {
        let value = json!([{"label": "joy", "score": 0.3}]);
        assert_eq!(emotion_sentiment(&value).unwrap(), SentimentLabel::Positive);
    }

    #[test]
    fn weak_generic_label_is_neutral() {
        let value = json!([{"label": "positive", "score": 0.42}]);
        assert_eq!(emotion_sentiment(&value).unwrap(), SentimentLabel::Neutral);

        let value = json!([{"label": "negative", "score": 0.65}]);
        assert_eq!(emotion_sentiment(&value).unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn emotion_distribution_uses_top_prediction() {
        let value = json!([[
            {"label": "neutral", "score": 0.1},
            {"label": "sadness", "score": 0.7},
            {"label": "joy", "score": 0.2}
        ]]);
        assert_eq!(emotion_sentiment(&value).unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn emotion_without_label_is_parse_error() {
        let value = json!([{"score": 0.9}]);
        assert!(matches!(
            emotion_sentiment(&value),
            Err(MoodlogError::Parse(_))
        ));
    }

    #[test]
    fn summary_reports_dominant_polarity() {
        let value = json!([[
            {"label": "POSITIVE", "score": 0.55},
            {"label": "NEGATIVE", "score": 0.45}
        ]]);
        assert_eq!(summarize(&value).unwrap(), "Duygu analizi: pozitif");

        let value = json!({"label": "NEGATIVE", "score": 0.9});
        assert_eq!(summarize(&value).unwrap(), "Duygu analizi: negatif");

        let value = json!({"label": "neutral"});
        assert_eq!(summarize(&value).unwrap(), "Duygu analizi: nötr");
    }

    #[test]
    fn parse_error_preview_is_bounded() {
        let value = json!({ "error": "x".repeat(1000) });
        match binary_sentiment(&value) {
            Err(MoodlogError::Parse(message)) => assert!(message.chars().count() < 260),
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
