use thiserror::Error;

#[derive(Debug, Error)]
pub enum LichessClientError {
    #[error("lichess user not found or API error: {0}")]
    UserNotFound(String),
    #[error("Network error: {0}")]
    Network(String),
}
