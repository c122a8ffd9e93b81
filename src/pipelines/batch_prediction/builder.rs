use super::pipeline::BatchPredictionPipeline;
use crate::core::config::DEFAULT_MAX_BATCH;
use crate::core::LoadedAssets;
use std::sync::Arc;

pub struct BatchPredictionPipelineBuilder {
    assets: Arc<LoadedAssets>,
    max_batch: usize,
}

impl BatchPredictionPipelineBuilder {
    pub fn new(assets: Arc<LoadedAssets>) -> Self {
        Self {
            assets,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }

    /// Largest number of comments accepted in one batch.
    pub fn max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = max_batch;
        self
    }

    pub fn build(self) -> BatchPredictionPipeline {
        BatchPredictionPipeline {
            assets: self.assets,
            max_batch: self.max_batch,
        }
    }
}
