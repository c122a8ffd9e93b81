//! JSON bodies of the HTTP API.

use crate::pipelines::batch_prediction::{BatchPrediction, LabelStats};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Raw comments; numbers and booleans are accepted and used as text.
    #[serde(deserialize_with = "deserialize_comments")]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub sentiments: Vec<i64>,
    pub confidences: Vec<f64>,
    pub stats: LabelStats,
    pub total: usize,
    pub inference_time_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<BatchPrediction> for BatchResponse {
    fn from(prediction: BatchPrediction) -> Self {
        Self {
            sentiments: prediction.sentiments,
            confidences: prediction.confidences,
            stats: prediction.stats,
            total: prediction.total,
            inference_time_ms: prediction.inference_time_ms,
        }
    }
}

fn deserialize_comments<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|value| match value {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(de::Error::custom(format!(
                "comments must be strings, found {other}"
            ))),
        })
        .collect()
}
