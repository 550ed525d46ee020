use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

/// Connectivity report of `GET /test`. Never fails; problems are reported in the body.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/test", get(test_database))
}

fn set_or_not(value: &Option<String>) -> String {
    match value {
        Some(_) => "Set".to_string(),
        None => "Not Set".to_string(),
    }
}

async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let mut response = DiagnosticsResponse {
        backend: "Running".to_string(),
        database: "Not Connected".to_string(),
        database_url: set_or_not(&state.config.database_url),
        database_name: set_or_not(&state.config.database_name),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match state.store.list_collections().await {
        Ok(mut collections) => {
            collections.truncate(MAX_LISTED_COLLECTIONS);
            response.database = "Connected & Working".to_string();
            response.connection_status = "Connected".to_string();
            response.collections = collections;
        }
        Err(e) => {
            warn!("Database diagnostics failed: {}", e);
            let detail: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            response.database = format!("Error: {}", detail);
        }
    }

    Json(response)
}
