//! Ordered fallback across alternate inference models.
//!
//! The [`FallbackChain`] stores model ids in priority order (index 0 =
//! highest). A call tries each model in turn and returns the first success.
//!
//! # Fallback Triggers
//!
//! Every error falls through to the next model, whatever its kind:
//! a permanent `404`/`410` from a retired model is handled the same way as
//! a timeout. When the list is exhausted the last failure is reported.
//!
//! ```text
//! analyzer ──► FallbackChain
//!                 │ try in order
//!                 ▼
//!         cardiffnlp/twitter-roberta-base-sentiment-latest
//!                 │ any error
//!                 ▼
//!         j-hartmann/emotion-english-distilroberta-base
//!                 │ any error
//!                 ▼
//!         AllEndpointsFailed { last }
//! ```

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::traits::{InferenceProvider, Parameters};
use crate::{MoodlogError, Result};

/// Secondary models consulted when the primary sentiment model fails.
pub const DEFAULT_FALLBACK_MODELS: [&str; 2] = [
    "cardiffnlp/twitter-roberta-base-sentiment-latest",
    "j-hartmann/emotion-english-distilroberta-base",
];

/// Ordered list of models tried until one answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    models: Vec<String>,
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MODELS)
    }
}

impl FallbackChain {
    /// Create a chain from model ids in priority order.
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
        }
    }

    /// Model ids in priority order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Run `inputs` through each model until one succeeds.
    ///
    /// # Errors
    /// - [`MoodlogError::NoEndpoints`] when the chain is empty
    /// - [`MoodlogError::AllEndpointsFailed`] carrying the last model's error
    #[instrument(skip(self, provider, inputs, parameters), fields(provider = provider.name(), models = self.models.len()))]
    pub async fn infer(
        &self,
        provider: &dyn InferenceProvider,
        inputs: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Value> {
        let mut last_err = None;
        for model in &self.models {
            match provider.infer(model, inputs, parameters).await {
                Ok(value) => {
                    debug!(model = %model, "fallback model answered");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "fallback model failed, trying next");
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(last) => Err(MoodlogError::AllEndpointsFailed {
                attempted: self.models.len(),
                last: Box::new(last),
            }),
            None => Err(MoodlogError::NoEndpoints),
        }
    }
}
