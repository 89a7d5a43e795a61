//! moodlog error types

use std::time::Duration;

/// moodlog error types
#[derive(Debug, thiserror::Error)]
pub enum MoodlogError {
    // Input errors
    #[error("invalid input: {0}")]
    Validation(String),

    // Provider/network errors
    #[error("request timed out after {}ms", duration.as_millis())]
    Timeout { duration: Duration },

    #[error("request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized response: {0}")]
    Parse(String),

    // Fallback chain errors
    #[error("no inference endpoints configured")]
    NoEndpoints,

    #[error("all {attempted} inference endpoints failed, last error: {last}")]
    AllEndpointsFailed {
        attempted: usize,
        last: Box<MoodlogError>,
    },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Entry store errors
    #[error("storage error: {0}")]
    Storage(String),
}

impl MoodlogError {
    /// Whether the orchestrator should move on to the next sentiment tier.
    ///
    /// Every network and parse failure qualifies. Validation, configuration
    /// and storage errors are terminal for the caller.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(
            self,
            MoodlogError::Timeout { .. }
                | MoodlogError::RequestFailed { .. }
                | MoodlogError::Http(_)
                | MoodlogError::Json(_)
                | MoodlogError::Parse(_)
                | MoodlogError::NoEndpoints
                | MoodlogError::AllEndpointsFailed { .. }
        )
    }

    /// HTTP status carried by this error, looking through an exhausted
    /// fallback chain to the last failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            MoodlogError::RequestFailed { status, .. } => Some(*status),
            MoodlogError::AllEndpointsFailed { last, .. } => last.status(),
            _ => None,
        }
    }
}

/// Result type alias for moodlog operations
pub type Result<T> = std::result::Result<T, MoodlogError>;
