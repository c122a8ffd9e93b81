use thiserror::Error;

/// Every failure the service, its loaders and the dataset tools can report.
#[derive(Debug, Error)]
pub enum SentimentError {
    // Artifact loading
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Invalid artifact: {0}")]
    ArtifactFormat(String),

    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Request handling
    #[error("Model or vectorizer not loaded")]
    Unavailable,

    #[error("Empty comments list")]
    EmptyBatch,

    #[error("Batch too large (max {max})")]
    BatchTooLarge { max: usize, len: usize },

    #[error("Prediction error: {0}")]
    Inference(String),

    // Offline tools
    #[error("Dataset error: {0}")]
    Dataset(String),

    // Pass-through from dependencies
    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SentimentError>;

impl SentimentError {
    /// Wraps any failure raised while vectorizing or classifying a batch.
    pub fn inference(err: impl std::fmt::Display) -> Self {
        SentimentError::Inference(err.to_string())
    }
}
