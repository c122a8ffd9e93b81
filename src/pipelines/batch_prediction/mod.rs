//! Batch sentiment prediction for lists of raw comments.
//!
//! The pipeline validates a batch, vectorizes it, classifies every comment and
//! summarizes the labels. Labels are `-1` (negative), `0` (neutral) and `1`
//! (positive); each comes with a confidence in `[0, 1]`.
//!
//! ## Main Types
//!
//! - [`BatchPredictionPipeline`] - validation and inference over the loaded assets
//! - [`BatchPredictionPipelineBuilder`] - builder for batch limits
//! - [`BatchPrediction`] - per-comment labels, confidences and aggregate counts
//! - [`LabelStats`] - counts of positive, neutral and negative labels
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use comment_sentiment::core::{LoadedAssets, ServiceConfig};
//! use comment_sentiment::pipelines::batch_prediction::*;
//! use std::sync::Arc;
//!
//! let assets = Arc::new(LoadedAssets::load(&ServiceConfig::default()));
//! let pipeline = BatchPredictionPipelineBuilder::new(assets).max_batch(50).build();
//!
//! let comments = vec!["great video".to_string(), "terrible".to_string()];
//! let prediction = pipeline.predict(&comments)?;
//! println!("{:?} in {:.1} ms", prediction.sentiments, prediction.inference_time_ms);
//! # Ok::<(), comment_sentiment::core::SentimentError>(())
//! ```

pub mod builder;
pub mod pipeline;
pub mod stats;

pub use builder::BatchPredictionPipelineBuilder;
pub use pipeline::{BatchPrediction, BatchPredictionPipeline};
pub use stats::LabelStats;
