//! Telemetry metric name constants.
//!
//! Centralised metric names for moodlog operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `moodlog_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `model` — hosted model id (e.g. "distilbert/distilbert-base-uncased-finetuned-sst-2-english")
//! - `status` — outcome: "ok" or "error"
//! - `tier` — sentiment tier that produced the label: "primary", "fallback" or "heuristic"

/// Total inference requests sent, one per attempt.
///
/// Labels: `model`, `status` ("ok" | "error").
pub const INFERENCE_REQUESTS_TOTAL: &str = "moodlog_inference_requests_total";

/// Inference request duration in seconds, per attempt.
///
/// Labels: `model`.
pub const INFERENCE_REQUEST_DURATION_SECONDS: &str =
    "moodlog_inference_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `model`.
pub const INFERENCE_RETRIES_TOTAL: &str = "moodlog_inference_retries_total";

/// Sentiment resolutions by the tier that produced the label.
///
/// Labels: `tier`.
pub const SENTIMENT_TIER_TOTAL: &str = "moodlog_sentiment_tier_total";
