use super::error::{Result, SentimentError};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_MAX_BATCH: usize = 200;
pub const DEFAULT_MODEL_PATH: &str = "models/sentiment_model.json";
pub const DEFAULT_VECTORIZER_PATH: &str = "models/tfidf_vectorizer.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Runtime settings of the prediction service.
///
/// Every field can be overridden from the environment:
/// - `MAX_BATCH`: largest accepted batch (default 200)
/// - `MODEL_PATH`: classifier artifact
/// - `VECT_PATH`: vectorizer artifact
/// - `BIND_ADDR`: socket address the HTTP server listens on
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_batch: usize,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_batch: DEFAULT_MAX_BATCH,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            vectorizer_path: PathBuf::from(DEFAULT_VECTORIZER_PATH),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// the defaults for every missing key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("MAX_BATCH") {
            config.max_batch = parse_max_batch(&raw)?;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("VECT_PATH") {
            config.vectorizer_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("BIND_ADDR") {
            config.bind_addr = raw.trim().parse().map_err(|e| {
                SentimentError::Config(format!("BIND_ADDR '{raw}' is not a socket address: {e}"))
            })?;
        }

        Ok(config)
    }
}

fn parse_max_batch(raw: &str) -> Result<usize> {
    let value: usize = raw.trim().parse().map_err(|e| {
        SentimentError::Config(format!("MAX_BATCH '{raw}' is not a positive integer: {e}"))
    })?;
    if value == 0 {
        return Err(SentimentError::Config(
            "MAX_BATCH must be at least 1".to_string(),
        ));
    }
    Ok(value)
}
