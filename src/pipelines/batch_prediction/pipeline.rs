use super::stats::LabelStats;
use crate::core::{LoadedAssets, Result, SentimentError};
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

/// Result of classifying one batch. Vectors are parallel to the input comments.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPrediction {
    pub sentiments: Vec<i64>,
    pub confidences: Vec<f64>,
    pub stats: LabelStats,
    pub total: usize,
    /// Wall-clock time spent vectorizing and classifying.
    pub inference_time_ms: f64,
}

pub struct BatchPredictionPipeline {
    pub(crate) assets: Arc<LoadedAssets>,
    pub(crate) max_batch: usize,
}

impl BatchPredictionPipeline {
    pub fn max_batch(&self) -> usize {
        self.max_batch
    }

    pub fn assets(&self) -> &LoadedAssets {
        &self.assets
    }

    /// Checks, in order, that the assets are loaded, the batch is not empty
    /// and it does not exceed the batch limit.
    pub fn validate(&self, comments: &[String]) -> Result<()> {
        if !self.assets.is_ready() {
            return Err(SentimentError::Unavailable);
        }
        if comments.is_empty() {
            return Err(SentimentError::EmptyBatch);
        }
        if comments.len() > self.max_batch {
            return Err(SentimentError::BatchTooLarge {
                max: self.max_batch,
                len: comments.len(),
            });
        }
        Ok(())
    }

    /// Classifies every comment of the batch, preserving input order.
    pub fn predict(&self, comments: &[String]) -> Result<BatchPrediction> {
        self.validate(comments)?;

        let start = Instant::now();
        let (sentiments, confidences) = self.infer(comments).map_err(|e| {
            error!("Prediction failed: {}", e);
            match e {
                SentimentError::Inference(_) => e,
                other => SentimentError::inference(other),
            }
        })?;
        let inference_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let stats = LabelStats::from_labels(&sentiments);
        Ok(BatchPrediction {
            total: sentiments.len(),
            sentiments,
            confidences,
            stats,
            inference_time_ms,
        })
    }

    fn infer(&self, comments: &[String]) -> Result<(Vec<i64>, Vec<f64>)> {
        let (vectorizer, classifier) = self.assets.get().ok_or(SentimentError::Unavailable)?;

        let features = vectorizer.transform(comments)?;
        let (sentiments, confidences) = classifier.predict_with_confidence(&features)?;

        if sentiments.len() != comments.len() || confidences.len() != comments.len() {
            return Err(SentimentError::Inference(format!(
                "classifier returned {} labels and {} confidences for {} comments",
                sentiments.len(),
                confidences.len(),
                comments.len()
            )));
        }
        Ok((sentiments, confidences))
    }
}
