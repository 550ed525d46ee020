use axum::{http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
}

/// Health check endpoint to verify API status
pub async fn health_check() -> (StatusCode, String) {
    (StatusCode::OK, "Healthy!".to_string())
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Chess archive API is running".to_string(),
    })
}

async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the chess archive API".to_string(),
    })
}
