use axum::{extract::State, routing::post, Json, Router};
use shared::models::import::requests::ImportRequest;
use shared::models::import::responses::ImportResponse;
use tracing::{debug, error};

use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/import/chesscom", post(import_chesscom))
        .route("/import/lichess", post(import_lichess))
}

async fn import_chesscom(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let response = state
        .import_service
        .import_chesscom(&request)
        .await
        .map_err(|e| {
            error!(
                "Failed to import chess.com games for {}: {}",
                request.username, e
            );
            ApiError::from(e)
        })?;
    debug!(
        "Imported {} chess.com game(s) for {}",
        response.inserted, response.username
    );
    Ok(Json(response))
}

async fn import_lichess(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let response = state
        .import_service
        .import_lichess(&request)
        .await
        .map_err(|e| {
            error!(
                "Failed to import lichess games for {}: {}",
                request.username, e
            );
            ApiError::from(e)
        })?;
    debug!(
        "Imported {} lichess game(s) for {}",
        response.inserted, response.username
    );
    Ok(Json(response))
}
