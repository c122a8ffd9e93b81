//! Sentiment API server entry point

use anyhow::Result;
use comment_sentiment::{server, BatchPredictionPipelineBuilder, LoadedAssets, ServiceConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    let assets = Arc::new(LoadedAssets::load(&config));
    let pipeline = BatchPredictionPipelineBuilder::new(assets)
        .max_batch(config.max_batch)
        .build();

    server::start_server(Arc::new(pipeline), config.bind_addr).await
}
