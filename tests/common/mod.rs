//! Scripted inference provider shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use moodlog::providers::{InferenceProvider, Parameters};
use moodlog::{MoodlogError, Result};
use serde_json::Value;

pub const PRIMARY: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";
pub const SENTIMENT_FALLBACK: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";
pub const EMOTION_FALLBACK: &str = "j-hartmann/emotion-english-distilroberta-base";

/// What a scripted model answers.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Timeout,
    Status(u16),
}

impl Reply {
    fn into_result(self) -> Result<Value> {
        match self {
            Reply::Json(value) => Ok(value),
            Reply::Timeout => Err(MoodlogError::Timeout {
                duration: Duration::from_millis(8000),
            }),
            Reply::Status(status) => Err(MoodlogError::RequestFailed {
                status,
                message: format!("scripted failure ({status})"),
            }),
        }
    }
}

/// Provider that answers per model from a fixed script and logs calls.
///
/// Models missing from the script answer `404`.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, model: &str, reply: Reply) -> Self {
        self.replies.insert(model.to_string(), reply);
        self
    }

    /// Every call as `(model, inputs)`, in order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, model: &str) -> usize {
        self.calls().iter().filter(|(m, _)| m == model).count()
    }
}

#[async_trait]
impl InferenceProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn infer(
        &self,
        model: &str,
        inputs: &str,
        _parameters: Option<&Parameters>,
    ) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), inputs.to_string()));
        self.replies
            .get(model)
            .cloned()
            .unwrap_or(Reply::Status(404))
            .into_result()
    }
}
