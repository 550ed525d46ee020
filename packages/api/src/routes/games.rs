use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use shared::models::games::requests::GamesQuery;
use shared::models::games::responses::GamesResponse;
use tracing::error;

use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/games", get(list_games))
}

async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> Result<Json<GamesResponse>, ApiError> {
    state
        .game_service
        .list_games(&query)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to list games for {:?}: {}", query, e);
            ApiError::from(e)
        })
}
