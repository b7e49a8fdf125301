//! API request handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::error::SpamError;
use crate::spam::SpamScorer;

/// Shared application state
pub struct AppState {
    pub scorer: SpamScorer,
}

/// Classification request body
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub message: String,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

/// HTTP status for a classification failure
pub fn status_for(err: &SpamError) -> StatusCode {
    match err {
        SpamError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        SpamError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let model = state.scorer.model();

    Json(serde_json::json!({
        "status": "healthy",
        "service": "spam-rs",
        "version": env!("CARGO_PKG_VERSION"),
        "model_loaded": model.is_loaded(),
        "model_error": model.load_error(),
        "threshold": state.scorer.config().threshold(),
    }))
}

/// POST /api/classify - Score a message
pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Response {
    let message = req.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("Message must not be empty")),
        )
            .into_response();
    }

    match state.scorer.classify(message) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            warn!("Classification failed: {}", e);
            (status_for(&e), Json(ApiError::new(&e.to_string()))).into_response()
        }
    }
}
