use tracing::debug;

use crate::models::game::GameSource;
use crate::models::import::requests::{ImportRequest, MAX_IMPORT_LIMIT, MAX_MONTHS};
use crate::models::import::responses::ImportResponse;
use crate::services::chesscom_import_service::ChessComImportService;
use crate::services::errors::import_service_errors::ImportServiceError;
use crate::services::lichess_import_service::LichessImportService;

/// Entry point for imports: validates the request, normalizes the username for
/// the platform and hands off to that platform's importer.
#[derive(Clone)]
pub struct ImportService {
    chesscom: ChessComImportService,
    lichess: LichessImportService,
}

impl ImportService {
    pub fn new(chesscom: ChessComImportService, lichess: LichessImportService) -> Self {
        ImportService { chesscom, lichess }
    }

    pub async fn import_chesscom(
        &self,
        request: &ImportRequest,
    ) -> Result<ImportResponse, ImportServiceError> {
        validate(request)?;
        // chess.com usernames are case-insensitive; archive URLs use lowercase.
        let username = request.username.trim().to_lowercase();
        debug!("Starting chess.com import for {}", username);

        let inserted = self
            .chesscom
            .import_games(
                &username,
                request.months_or_default(),
                request.limit_or_default(),
            )
            .await?;

        Ok(ImportResponse {
            source: GameSource::Chesscom,
            username,
            inserted,
        })
    }

    pub async fn import_lichess(
        &self,
        request: &ImportRequest,
    ) -> Result<ImportResponse, ImportServiceError> {
        validate(request)?;
        let username = request.username.trim().to_string();
        debug!("Starting lichess import for {}", username);

        let inserted = self
            .lichess
            .import_games(&username, request.limit_or_default())
            .await?;

        Ok(ImportResponse {
            source: GameSource::Lichess,
            username,
            inserted,
        })
    }
}

fn validate(request: &ImportRequest) -> Result<(), ImportServiceError> {
    if request.username.trim().is_empty() {
        return Err(ImportServiceError::Validation(
            "Username cannot be empty".to_string(),
        ));
    }

    let months = request.months_or_default();
    if months == 0 || months > MAX_MONTHS {
        return Err(ImportServiceError::Validation(format!(
            "Months must be between 1 and {}",
            MAX_MONTHS
        )));
    }

    let limit = request.limit_or_default();
    if limit == 0 || limit > MAX_IMPORT_LIMIT {
        return Err(ImportServiceError::Validation(format!(
            "Limit must be between 1 and {}",
            MAX_IMPORT_LIMIT
        )));
    }

    Ok(())
}
