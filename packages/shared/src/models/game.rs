use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the collection imported games are stored in.
pub const GAME_COLLECTION: &str = "game";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSource {
    Chesscom,
    Lichess,
}

impl GameSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameSource::Chesscom => "chesscom",
            GameSource::Lichess => "lichess",
        }
    }
}

impl fmt::Display for GameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chesscom" => Ok(GameSource::Chesscom),
            "lichess" => Ok(GameSource::Lichess),
            other => Err(format!("Unknown game source: {}", other)),
        }
    }
}

/// A chess game imported from an external platform, normalized to a common shape.
/// `source` and `pgn` together identify a game; everything else depends on what
/// the platform reported.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Game {
    pub source: GameSource,
    pub username: String,
    #[serde(default)]
    pub white: Option<String>,
    #[serde(default)]
    pub black: Option<String>,
    pub pgn: String,
    #[serde(default)]
    pub rated: Option<bool>,
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub time_control: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub opening: Option<String>,
}

impl Game {
    /// A game carrying only its identity; adapters fill in the rest.
    pub fn new(source: GameSource, username: &str, pgn: &str) -> Self {
        Game {
            source,
            username: username.to_string(),
            white: None,
            black: None,
            pgn: pgn.to_string(),
            rated: None,
            speed: None,
            time_control: None,
            result: None,
            end_time: None,
            opening: None,
        }
    }
}

/// A game as read back from the store, with the envelope fields added on insert.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoredGame {
    pub id: String,
    #[serde(flatten)]
    pub game: Game,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
