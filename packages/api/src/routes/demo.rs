use axum::{extract::Query, routing::post, Json, Router};
use serde::Deserialize;
use shared::models::demo::DemoSession;
use shared::services::demo_service;
use tracing::{debug, warn};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct StartDemoParams {
    pub speed: String,
    pub minutes: i64,
    pub increment: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/start-demo", post(start_demo))
}

async fn start_demo(Query(params): Query<StartDemoParams>) -> Result<Json<DemoSession>, ApiError> {
    let session = demo_service::start_demo(&params.speed, params.minutes, params.increment)
        .map_err(|e| {
            warn!("Rejected demo request {:?}: {}", params, e);
            ApiError::from(e)
        })?;
    debug!("Started demo session {}", session.session_id);
    Ok(Json(session))
}
