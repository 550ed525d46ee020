use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DemoServiceError {
    #[error("Invalid speed")]
    InvalidSpeed,
    #[error("Invalid time values")]
    InvalidTimeValues,
}
