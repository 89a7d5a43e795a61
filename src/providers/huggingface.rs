//! HuggingFace Inference API client for text classification.
//!
//! This client uses HuggingFace's hosted inference endpoints.
//! See: <https://huggingface.co/docs/inference-providers/index>

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::retry::RetryPolicy;
use super::traits::{InferenceProvider, Parameters};
use crate::telemetry;
use crate::{MoodlogError, Result};

/// Default base URL for the HuggingFace inference router
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Default wall-clock budget for one request attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Longest diagnostic kept from an error response body.
const MAX_ERROR_CHARS: usize = 200;

/// Client for the HuggingFace Inference API.
///
/// Each attempt is bounded by [`DEFAULT_TIMEOUT`] (configurable); a
/// "model loading" response is retried according to the [`RetryPolicy`].
#[derive(Clone)]
pub struct HuggingFaceClient {
    api_key: Option<String>,
    http: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HuggingFaceClient {
    /// Create a client against the public inference router.
    ///
    /// Without an API key requests are still sent, just unauthenticated.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| MoodlogError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        })
    }

    /// Set the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Endpoint URL for a model id.
    pub fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    /// Classify `inputs` with `model` and return the raw JSON response.
    ///
    /// # Errors
    /// - [`MoodlogError::Timeout`] when an attempt exceeds the timeout
    /// - [`MoodlogError::RequestFailed`] for a non-success status once the
    ///   retry policy is exhausted
    /// - [`MoodlogError::Json`] when a success body is not JSON
    /// - [`MoodlogError::Http`] for transport failures
    pub async fn infer(
        &self,
        model: &str,
        inputs: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Value> {
        let url = self.model_url(model);
        let body = InferenceRequest {
            inputs,
            parameters: parameters.filter(|p| !p.is_empty()),
        };

        let mut attempt = 1;
        loop {
            debug!(url = %url, attempt, inputs_len = inputs.len(), "sending inference request");

            let start = Instant::now();
            let outcome = tokio::time::timeout(self.timeout, self.exchange(&url, &body))
                .await
                .unwrap_or(Err(MoodlogError::Timeout {
                    duration: self.timeout,
                }));
            Self::record_request(model, start, matches!(outcome, Ok(Exchange::Success(_))));

            match outcome? {
                Exchange::Success(value) => return Ok(value),
                Exchange::Failure { status, .. } if self.retry.should_retry(status, attempt) => {
                    metrics::counter!(telemetry::INFERENCE_RETRIES_TOTAL,
                        "model" => model.to_owned(),
                    )
                    .increment(1);
                    warn!(
                        model,
                        status,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = self.retry.delay.as_millis() as u64,
                        "model not ready, retrying"
                    );
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
                Exchange::Failure { status, body } => {
                    return Err(MoodlogError::RequestFailed {
                        status,
                        message: error_message(status, body.as_deref()),
                    });
                }
            }
        }
    }

    /// Send one request and read its body.
    async fn exchange(&self, url: &str, body: &InferenceRequest<'_>) -> Result<Exchange> {
        let mut request = self.http.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| MoodlogError::Http(e.to_string()))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "inference response received");

        if !status.is_success() {
            return Ok(Exchange::Failure {
                status: status.as_u16(),
                body: response.text().await.ok(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MoodlogError::Http(e.to_string()))?;
        Ok(Exchange::Success(serde_json::from_slice(&bytes)?))
    }

    /// Record attempt outcome metrics (counter + histogram).
    fn record_request(model: &str, start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::INFERENCE_REQUESTS_TOTAL,
            "model" => model.to_owned(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::INFERENCE_REQUEST_DURATION_SECONDS,
            "model" => model.to_owned(),
        )
        .record(start.elapsed().as_secs_f64());
    }
}

/// Outcome of a single request attempt that reached the server.
enum Exchange {
    Success(Value),
    Failure { status: u16, body: Option<String> },
}

/// Build the diagnostic carried by [`MoodlogError::RequestFailed`].
///
/// HTML error pages are replaced by a status-only marker; other bodies are
/// cut to [`MAX_ERROR_CHARS`] characters.
pub(crate) fn error_message(status: u16, body: Option<&str>) -> String {
    match body {
        None => format!("response body unreadable ({status})"),
        Some(text) if text.contains("<!DOCTYPE html>") || text.contains("<html") => {
            format!("HTML error page ({status})")
        }
        Some(text) => text.chars().take(MAX_ERROR_CHARS).collect(),
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<&'a Parameters>,
}

// ============================================================================
// Provider Trait Implementation
// ============================================================================

#[async_trait]
impl InferenceProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn infer(
        &self,
        model: &str,
        inputs: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Value> {
        HuggingFaceClient::infer(self, model, inputs, parameters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_bodies_are_masked() {
        let body = "<!DOCTYPE html><html><body>Bad Gateway</body></html>";
        assert_eq!(error_message(502, Some(body)), "HTML error page (502)");
        assert_eq!(
            error_message(500, Some("oops <html lang=\"en\">")),
            "HTML error page (500)"
        );
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundaries() {
        let body = "ğ".repeat(500);
        let message = error_message(400, Some(&body));
        assert_eq!(message.chars().count(), MAX_ERROR_CHARS);
    }

    #[test]
    fn short_bodies_pass_through() {
        let body = r#"{"error":"Model not found"}"#;
        assert_eq!(error_message(404, Some(body)), body);
    }

    #[test]
    fn unreadable_body_reports_status() {
        assert_eq!(error_message(500, None), "response body unreadable (500)");
    }

    #[test]
    fn model_url_joins_base_and_model() {
        let client =
            HuggingFaceClient::with_base_url(None, "http://localhost:9000/").expect("client");
        assert_eq!(
            client.model_url("j-hartmann/emotion-english-distilroberta-base"),
            "http://localhost:9000/models/j-hartmann/emotion-english-distilroberta-base"
        );
    }

    #[test]
    fn empty_parameters_are_omitted() {
        let empty = Parameters::new();
        let body = InferenceRequest {
            inputs: "merhaba",
            parameters: Some(&empty).filter(|p| !p.is_empty()),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "inputs": "merhaba" })
        );
    }
}
