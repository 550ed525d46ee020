pub mod demo_service_errors;
pub mod game_service_errors;
pub mod import_service_errors;
