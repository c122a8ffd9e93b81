//! HTTP front end of the batch prediction pipeline.
//!
//! - `GET /health` reports whether the model assets loaded
//! - `POST /predict_batch` classifies `{"comments": [...]}`

pub mod error;
pub mod handlers;
pub mod schema;

pub use error::ApiError;
pub use schema::{BatchRequest, BatchResponse, ErrorResponse, HealthResponse};

use crate::pipelines::batch_prediction::BatchPredictionPipeline;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<BatchPredictionPipeline>,
}

pub fn router(pipeline: Arc<BatchPredictionPipeline>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/predict_batch", post(handlers::predict_batch))
        .with_state(AppState { pipeline })
}

/// Serves the API on an already bound listener until Ctrl-C.
pub async fn serve(
    listener: TcpListener,
    pipeline: Arc<BatchPredictionPipeline>,
) -> anyhow::Result<()> {
    info!("Sentiment API listening on {}", listener.local_addr()?);

    let app = router(pipeline);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Sentiment API stopped");
    Ok(())
}

/// Binds `addr` and serves the API on it.
pub async fn start_server(
    pipeline: Arc<BatchPredictionPipeline>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, pipeline).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
