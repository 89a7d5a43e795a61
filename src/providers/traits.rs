//! Provider trait for hosted sentiment inference.
//!
//! The orchestrator and the fallback chain only talk to an
//! [`InferenceProvider`]; [`HuggingFaceClient`](super::HuggingFaceClient)
//! is the production implementation. Tests substitute scripted providers.
//!
//! # Contract
//!
//! A provider performs one logical inference call against a hosted model
//! and returns the raw JSON body. Retries for "model loading" responses are
//! the provider's business; the caller only sees the final outcome. Any
//! error is eligible for fallback to the next tier.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::Result;

/// Optional model parameters forwarded verbatim in the request body.
pub type Parameters = Map<String, Value>;

/// Provider for hosted text-classification inference.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Run `inputs` through `model` and return the raw response body.
    async fn infer(
        &self,
        model: &str,
        inputs: &str,
        parameters: Option<&Parameters>,
    ) -> Result<Value>;
}
