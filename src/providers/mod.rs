//! Inference providers and the request plumbing around them.
//!
//! - [`HuggingFaceClient`] executes timed requests with a [`RetryPolicy`]
//! - [`FallbackChain`] walks alternate models in priority order
//! - [`InferenceProvider`] is the seam both are written against

pub mod fallback;
pub mod huggingface;
pub mod retry;
pub mod traits;

pub use fallback::{DEFAULT_FALLBACK_MODELS, FallbackChain};
pub use huggingface::HuggingFaceClient;
pub use retry::RetryPolicy;
pub use traits::{InferenceProvider, Parameters};
