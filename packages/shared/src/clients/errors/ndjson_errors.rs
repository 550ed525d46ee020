use thiserror::Error;

#[derive(Debug, Error)]
pub enum NdjsonError {
    /// The line was not a JSON object of the expected shape. The stream continues.
    #[error("Malformed line: {0}")]
    Malformed(String),
    /// Reading the body failed. The stream ends after this item.
    #[error("Transport error: {0}")]
    Transport(String),
}
