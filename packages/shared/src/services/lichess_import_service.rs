use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clients::errors::lichess_client_errors::LichessClientError;
use crate::clients::errors::ndjson_errors::NdjsonError;
use crate::clients::lichess_client::{LichessApi, LichessGame, LichessOpening, LichessPlayer};
use crate::models::game::{Game, GameSource};
use crate::services::errors::import_service_errors::ImportServiceError;
use crate::services::game_service::GameService;

/// Imports a user's recent games from the lichess export stream.
#[derive(Clone)]
pub struct LichessImportService {
    api: Arc<dyn LichessApi + Send + Sync>,
    game_service: GameService,
}

impl LichessImportService {
    pub fn new(api: Arc<dyn LichessApi + Send + Sync>, game_service: GameService) -> Self {
        LichessImportService { api, game_service }
    }

    /// Streams up to `limit` games and stores the ones not already imported.
    /// lichess enforces the cap, so every streamed game is considered.
    pub async fn import_games(&self, username: &str, limit: u32) -> Result<u32, ImportServiceError> {
        let mut games = self
            .api
            .export_games(username, limit)
            .await
            .map_err(|e| match e {
                LichessClientError::UserNotFound(_) => {
                    ImportServiceError::UpstreamNotFound(e.to_string())
                }
                LichessClientError::Network(_) => {
                    ImportServiceError::UpstreamUnavailable(e.to_string())
                }
            })?;

        let mut inserted = 0;
        while let Some(record) = games.next_record().await {
            let source_game = match record {
                Ok(source_game) => source_game,
                Err(NdjsonError::Malformed(e)) => {
                    warn!("Skipping malformed lichess line: {}", e);
                    continue;
                }
                Err(e @ NdjsonError::Transport(_)) => {
                    return Err(ImportServiceError::UpstreamUnavailable(e.to_string()));
                }
            };

            let Some(game) = normalize_game(username, source_game) else {
                debug!("Skipping lichess game without PGN");
                continue;
            };

            if self.game_service.insert_if_absent(&game).await? {
                inserted += 1;
            }
        }

        info!("Imported {} lichess game(s) for {}", inserted, username);
        Ok(inserted)
    }
}

/// Maps one exported lichess game onto [`Game`]. `None` when it carries no PGN.
pub fn normalize_game(username: &str, source_game: LichessGame) -> Option<Game> {
    let pgn = source_game
        .pgn
        .filter(|pgn| !pgn.is_empty())
        .or(source_game.pgn_str)
        .filter(|pgn| !pgn.is_empty())?;

    let (white_player, black_player) = match source_game.players {
        Some(players) => (players.white, players.black),
        None => (None, None),
    };

    let mut game = Game::new(GameSource::Lichess, username, &pgn);
    game.white = player_name(white_player).or(source_game.white.filter(|w| !w.is_empty()));
    game.black = player_name(black_player).or(source_game.black.filter(|b| !b.is_empty()));
    game.rated = source_game.rated;
    game.speed = source_game.speed.filter(|speed| !speed.is_empty());
    game.time_control = source_game.time_control.filter(|tc| !tc.is_empty());
    game.result = source_game.status.filter(|status| !status.is_empty());
    game.end_time = source_game.last_move_at.as_ref().and_then(epoch_millis);
    game.opening = source_game
        .opening
        .as_ref()
        .and_then(LichessOpening::name)
        .map(str::to_string);
    Some(game)
}

fn player_name(player: Option<LichessPlayer>) -> Option<String> {
    player
        .and_then(|player| player.user)
        .and_then(|user| user.name)
        .filter(|name| !name.is_empty())
}

fn epoch_millis(value: &Value) -> Option<DateTime<Utc>> {
    // Fractional milliseconds are truncated.
    let millis = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|n| n.trunc() as i64))?,
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|n| n.trunc() as i64))?
        }
        _ => return None,
    };
    DateTime::from_timestamp_millis(millis)
}
