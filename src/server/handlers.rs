use super::error::ApiError;
use super::schema::{BatchRequest, BatchResponse, HealthResponse};
use super::AppState;
use crate::core::SentimentError;
use axum::extract::{ConnectInfo, State};
use axum::Json;
use std::net::SocketAddr;
use tracing::{error, info};

/// Reports whether the vectorizer and classifier were loaded. Always 200.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let assets = state.pipeline.assets();
    Json(HealthResponse {
        status: if assets.is_ready() { "ok" } else { "error" }.to_string(),
        model_loaded: assets.model_loaded(),
        vectorizer_loaded: assets.vectorizer_loaded(),
    })
}

/// Classifies a batch of comments on the blocking thread pool.
pub async fn predict_batch(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let client = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let pipeline = state.pipeline.clone();
    let comments = payload.comments;
    let prediction = tokio::task::spawn_blocking(move || pipeline.predict(&comments))
        .await
        .map_err(|e| {
            error!("Prediction task failed: {}", e);
            SentimentError::inference(e)
        })??;

    info!(
        "predicted {} comments in {:.1} ms from {}",
        prediction.total, prediction.inference_time_ms, client
    );
    Ok(Json(prediction.into()))
}
