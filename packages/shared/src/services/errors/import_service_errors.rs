use thiserror::Error;

use crate::services::errors::game_service_errors::GameServiceError;

#[derive(Debug, Error)]
pub enum ImportServiceError {
    #[error("Validation error: {0}")]
    Validation(String),
    /// The platform rejected the user lookup. The message names the user.
    #[error("{0}")]
    UpstreamNotFound(String),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error(transparent)]
    GameService(#[from] GameServiceError),
}
