pub mod chesscom_client;
pub mod errors;
pub(crate) mod lenient;
pub mod lichess_client;
pub mod ndjson;
