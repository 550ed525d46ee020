use thiserror::Error;

use crate::repositories::errors::document_store_errors::DocumentStoreError;

#[derive(Debug, Error)]
pub enum GameServiceError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Repository error: {0}")]
    Repository(#[from] DocumentStoreError),
}
