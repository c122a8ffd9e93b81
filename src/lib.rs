pub mod core;
pub mod dataset;
pub mod loaders;
pub mod models;
pub mod pipelines;
pub mod server;

// Re-export the types most callers need
pub use self::core::{LoadedAssets, Result, SentimentError, ServiceConfig};
pub use models::{SentimentClassifier, Vectorizer};
pub use pipelines::batch_prediction::{
    BatchPrediction, BatchPredictionPipeline, BatchPredictionPipelineBuilder, LabelStats,
};
