// Stub vectorizer and classifiers shared by the integration tests

#![allow(dead_code)]

use candle_core::{Device, Tensor};
use comment_sentiment::core::Result;
use comment_sentiment::models::{
    Classifier, ProbabilisticClassifier, SentimentClassifier, Vectorizer,
};
use comment_sentiment::{BatchPredictionPipeline, BatchPredictionPipelineBuilder, LoadedAssets};
use std::collections::HashMap;
use std::sync::Arc;

/// Encodes each known comment as a single feature holding its label.
pub struct LookupVectorizer {
    labels: HashMap<String, f32>,
}

impl LookupVectorizer {
    pub fn new(pairs: &[(&str, i64)]) -> Self {
        Self {
            labels: pairs
                .iter()
                .map(|(text, label)| (text.to_string(), *label as f32))
                .collect(),
        }
    }

    pub fn sentiments() -> Self {
        Self::new(&[("great video", 1), ("terrible", -1), ("meh", 0), ("weird", 7)])
    }
}

impl Vectorizer for LookupVectorizer {
    fn transform(&self, texts: &[String]) -> Result<Tensor> {
        let codes: Vec<f32> = texts
            .iter()
            .map(|text| self.labels.get(text).copied().unwrap_or(0.0))
            .collect();
        Ok(Tensor::from_vec(codes, (texts.len(), 1), &Device::Cpu)?)
    }
}

/// Returns the encoded label and, optionally, a fixed confidence.
pub struct EchoClassifier {
    pub confidence: f64,
}

impl Classifier for EchoClassifier {
    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        Ok(features
            .to_vec2::<f32>()?
            .iter()
            .map(|row| row[0] as i64)
            .collect())
    }
}

impl ProbabilisticClassifier for EchoClassifier {
    fn predict_proba(&self, features: &Tensor) -> Result<Vec<Vec<f64>>> {
        let rest = (1.0 - self.confidence) / 2.0;
        let (rows, _) = features.dims2()?;
        Ok(vec![vec![rest, self.confidence, rest]; rows])
    }
}

/// Fails every prediction.
pub struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn predict(&self, _features: &Tensor) -> Result<Vec<i64>> {
        Err(candle_core::Error::Msg("weights are corrupt".to_string()).into())
    }
}

/// Drops the last prediction of every batch.
pub struct ShortClassifier;

impl Classifier for ShortClassifier {
    fn predict(&self, features: &Tensor) -> Result<Vec<i64>> {
        let (rows, _) = features.dims2()?;
        Ok(vec![1; rows.saturating_sub(1)])
    }
}

pub fn pipeline(
    classifier: SentimentClassifier,
    max_batch: usize,
) -> Arc<BatchPredictionPipeline> {
    let assets = LoadedAssets::from_parts(LookupVectorizer::sentiments(), classifier);
    Arc::new(
        BatchPredictionPipelineBuilder::new(Arc::new(assets))
            .max_batch(max_batch)
            .build(),
    )
}

pub fn unloaded_pipeline(max_batch: usize) -> Arc<BatchPredictionPipeline> {
    Arc::new(
        BatchPredictionPipelineBuilder::new(Arc::new(LoadedAssets::unloaded()))
            .max_batch(max_batch)
            .build(),
    )
}

pub fn comments(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}
