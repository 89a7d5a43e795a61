//! Builder for configuring analyzer instances

use std::sync::Arc;
use std::time::Duration;

use super::{DEFAULT_PRIMARY_MODEL, SentimentAnalyzer};
use crate::config::{Config, Secrets};
use crate::providers::huggingface::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::providers::{
    DEFAULT_FALLBACK_MODELS, FallbackChain, HuggingFaceClient, InferenceProvider, RetryPolicy,
};
use crate::{MoodlogError, Result};

/// Builder for configuring [`SentimentAnalyzer`] instances.
///
/// Without an explicit [`provider`](Self::provider) a [`HuggingFaceClient`]
/// is built from the key, base URL, timeout and retry settings.
pub struct AnalyzerBuilder {
    huggingface_key: Option<String>,
    base_url: String,
    primary_model: String,
    fallback_models: Vec<String>,
    timeout: Duration,
    retry_policy: RetryPolicy,
    provider: Option<Arc<dyn InferenceProvider>>,
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            huggingface_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            fallback_models: DEFAULT_FALLBACK_MODELS.iter().map(|m| m.to_string()).collect(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
            provider: None,
        }
    }

    /// Start from loaded configuration and secrets.
    pub fn from_config(config: &Config, secrets: &Secrets) -> Self {
        let inference = &config.inference;
        let mut builder = Self::new()
            .base_url(&inference.base_url)
            .primary_model(&inference.primary_model)
            .fallback_models(inference.fallback_models.iter().cloned())
            .timeout(inference.timeout())
            .retry_policy(RetryPolicy::from(&inference.retry));
        if let Some(key) = secrets.huggingface_key() {
            builder = builder.huggingface(key);
        }
        builder
    }

    /// Configure the HuggingFace API key.
    pub fn huggingface(mut self, api_key: impl Into<String>) -> Self {
        self.huggingface_key = Some(api_key.into());
        self
    }

    /// Override the inference router base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the binary sentiment model asked first.
    pub fn primary_model(mut self, model: impl Into<String>) -> Self {
        self.primary_model = model.into();
        self
    }

    /// Replace the fallback models (in priority order).
    pub fn fallback_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy for "model loading" responses.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Use a custom inference provider instead of the HuggingFace client.
    ///
    /// Key, base URL, timeout and retry settings are ignored in that case.
    pub fn provider(mut self, provider: Arc<dyn InferenceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the analyzer.
    pub fn build(self) -> Result<SentimentAnalyzer> {
        if self.primary_model.trim().is_empty() {
            return Err(MoodlogError::Configuration(
                "primary model must not be empty".to_string(),
            ));
        }

        let provider: Arc<dyn InferenceProvider> = match self.provider {
            Some(provider) => provider,
            None => Arc::new(
                HuggingFaceClient::with_base_url(self.huggingface_key, self.base_url)?
                    .timeout(self.timeout)
                    .retry_policy(self.retry_policy),
            ),
        };

        Ok(SentimentAnalyzer::new(
            provider,
            self.primary_model,
            FallbackChain::new(self.fallback_models),
        ))
    }
}
