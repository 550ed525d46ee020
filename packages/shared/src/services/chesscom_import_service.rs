use std::sync::Arc;

use chrono::DateTime;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clients::chesscom_client::{ChessComApi, ChessComGame};
use crate::clients::errors::chesscom_client_errors::ChessComClientError;
use crate::models::game::{Game, GameSource};
use crate::services::errors::import_service_errors::ImportServiceError;
use crate::services::game_service::GameService;

/// Imports a user's recent games from their chess.com monthly archives.
#[derive(Clone)]
pub struct ChessComImportService {
    api: Arc<dyn ChessComApi + Send + Sync>,
    game_service: GameService,
}

impl ChessComImportService {
    pub fn new(api: Arc<dyn ChessComApi + Send + Sync>, game_service: GameService) -> Self {
        ChessComImportService { api, game_service }
    }

    /// Scans the `months` most recent archives, newest first, and stores up to
    /// `limit` games not already imported. Returns how many were stored.
    pub async fn import_games(
        &self,
        username: &str,
        months: u32,
        limit: u32,
    ) -> Result<u32, ImportServiceError> {
        let archives = self
            .api
            .fetch_archive_index(username)
            .await
            .map_err(|e| match e {
                ChessComClientError::UserNotFound(_) => {
                    ImportServiceError::UpstreamNotFound(e.to_string())
                }
                _ => ImportServiceError::UpstreamUnavailable(e.to_string()),
            })?;

        let window_start = archives.len().saturating_sub(months as usize);
        let mut inserted = 0;

        for archive_url in archives[window_start..].iter().rev() {
            if inserted >= limit {
                break;
            }

            let raw_games = match self.api.fetch_archive(archive_url).await {
                Ok(raw_games) => raw_games,
                Err(e) => {
                    warn!("Skipping chess.com archive {}: {}", archive_url, e);
                    continue;
                }
            };
            debug!("Archive {} holds {} game(s)", archive_url, raw_games.len());

            for raw_game in raw_games {
                if inserted >= limit {
                    break;
                }

                let source_game: ChessComGame = match serde_json::from_value(raw_game) {
                    Ok(source_game) => source_game,
                    Err(e) => {
                        debug!("Skipping undecodable chess.com game: {}", e);
                        continue;
                    }
                };
                let Some(game) = normalize_game(username, source_game) else {
                    debug!("Skipping chess.com game without PGN");
                    continue;
                };

                if self.game_service.insert_if_absent(&game).await? {
                    inserted += 1;
                }
            }
        }

        info!(
            "Imported {} chess.com game(s) for {} from {} archive(s)",
            inserted,
            username,
            archives.len() - window_start
        );
        Ok(inserted)
    }
}

/// Maps a chess.com archive entry onto [`Game`]. `None` when it carries no PGN.
pub fn normalize_game(username: &str, source_game: ChessComGame) -> Option<Game> {
    let pgn = source_game.pgn.filter(|pgn| !pgn.is_empty())?;

    let white_username = source_game
        .white
        .as_ref()
        .and_then(|player| player.username.clone())
        .filter(|name| !name.is_empty());
    let black_username = source_game
        .black
        .as_ref()
        .and_then(|player| player.username.clone())
        .filter(|name| !name.is_empty());

    let white_result = source_game.white.and_then(|player| player.result);
    let black_result = source_game.black.and_then(|player| player.result);
    let result = match (white_result, black_result) {
        (Some(white), Some(black)) => Some(format!("{}/{}", white, black)),
        _ => None,
    };

    let time_control = match source_game.time_control {
        None | Some(Value::Null) => None,
        Some(Value::String(time_control)) => Some(time_control),
        Some(other) => Some(other.to_string()),
    };

    let end_time = source_game
        .end_time
        .as_ref()
        .and_then(Value::as_i64)
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0));

    let mut game = Game::new(GameSource::Chesscom, username, &pgn);
    game.white = white_username;
    game.black = black_username;
    game.rated = source_game.rated;
    game.speed = source_game.time_class;
    game.time_control = time_control;
    game.result = result;
    game.end_time = end_time;
    Some(game)
}
