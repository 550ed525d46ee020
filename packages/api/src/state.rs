use std::sync::Arc;

use shared::clients::chesscom_client::ChessComApi;
use shared::clients::lichess_client::LichessApi;
use shared::repositories::document_store::DocumentStore;
use shared::services::chesscom_import_service::ChessComImportService;
use shared::services::game_service::GameService;
use shared::services::import_service::ImportService;
use shared::services::lichess_import_service::LichessImportService;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub import_service: Arc<ImportService>,
    pub game_service: Arc<GameService>,
    pub store: Arc<dyn DocumentStore + Send + Sync>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the services on top of one store and the two platform clients.
    pub fn new(
        config: Config,
        store: Arc<dyn DocumentStore + Send + Sync>,
        chesscom_api: Arc<dyn ChessComApi + Send + Sync>,
        lichess_api: Arc<dyn LichessApi + Send + Sync>,
    ) -> Self {
        let game_service = GameService::new(store.clone());
        let import_service = ImportService::new(
            ChessComImportService::new(chesscom_api, game_service.clone()),
            LichessImportService::new(lichess_api, game_service.clone()),
        );

        AppState {
            import_service: Arc::new(import_service),
            game_service: Arc::new(game_service),
            store,
            config: Arc::new(config),
        }
    }
}
