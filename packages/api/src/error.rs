use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::services::errors::{
    demo_service_errors::DemoServiceError, game_service_errors::GameServiceError,
    import_service_errors::ImportServiceError,
};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    ImportService(ImportServiceError),
    GameService(GameServiceError),
    DemoService(DemoServiceError),
}

impl From<ImportServiceError> for ApiError {
    fn from(error: ImportServiceError) -> Self {
        ApiError::ImportService(error)
    }
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl From<DemoServiceError> for ApiError {
    fn from(error: DemoServiceError) -> Self {
        ApiError::DemoService(error)
    }
}

fn game_service_status(error: &GameServiceError) -> StatusCode {
    match error {
        GameServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        GameServiceError::Serialization(_) | GameServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ImportService(
                ImportServiceError::Validation(_) | ImportServiceError::UpstreamNotFound(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::ImportService(ImportServiceError::UpstreamUnavailable(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::ImportService(ImportServiceError::GameService(e)) => game_service_status(e),

            ApiError::GameService(e) => game_service_status(e),

            ApiError::DemoService(_) => StatusCode::BAD_REQUEST,
        };

        // Datastore details stay in the logs.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            match self {
                ApiError::ImportService(ImportServiceError::UpstreamNotFound(message)) => message,
                ApiError::ImportService(e) => e.to_string(),
                ApiError::GameService(e) => e.to_string(),
                ApiError::DemoService(e) => e.to_string(),
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
