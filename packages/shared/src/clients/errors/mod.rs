pub mod chesscom_client_errors;
pub mod lichess_client_errors;
pub mod ndjson_errors;
