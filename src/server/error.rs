use super::schema::ErrorResponse;
use crate::core::SentimentError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// A [`SentimentError`] on its way back to an HTTP caller.
#[derive(Debug)]
pub struct ApiError(pub SentimentError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            SentimentError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            SentimentError::EmptyBatch => StatusCode::BAD_REQUEST,
            SentimentError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message; internal failures are not described.
    pub fn detail(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => "Prediction error".to_string(),
            _ => self.0.to_string(),
        }
    }
}

impl From<SentimentError> for ApiError {
    fn from(err: SentimentError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}
