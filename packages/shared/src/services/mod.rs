pub mod chesscom_import_service;
pub mod demo_service;
pub mod errors;
pub mod game_service;
pub mod import_service;
pub mod lichess_import_service;
