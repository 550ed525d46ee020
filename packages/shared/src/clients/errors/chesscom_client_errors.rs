use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChessComClientError {
    #[error("chess.com user not found or no archives: {0}")]
    UserNotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("chess.com API error {0}: {1}")]
    Api(u16, String),
    #[error("Parse error: {0}")]
    Parse(String),
}
