use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Datastore error: {0}")]
    Backend(String),
}
