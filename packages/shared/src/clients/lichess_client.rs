use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::clients::errors::lichess_client_errors::LichessClientError;
use crate::clients::lenient::{lenient, truthy};
use crate::clients::ndjson::NdjsonStream;

#[cfg(test)]
use mockall::automock;

pub const LICHESS_BASE_URL: &str = "https://lichess.org";
const USER_AGENT: &str = concat!("chess-archive/", env!("CARGO_PKG_VERSION"));
const EXPORT_TIMEOUT: Duration = Duration::from_secs(60);
const EXPORTED_PERF_TYPES: &str = "bullet,blitz,rapid";

/// One line of a lichess game export.
///
/// Every field is decoded on its own: a field of an unexpected type is left
/// absent instead of rejecting the whole line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LichessGame {
    #[serde(default, deserialize_with = "lenient")]
    pub pgn: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pgn_str: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub players: Option<LichessPlayers>,
    #[serde(default, deserialize_with = "lenient")]
    pub white: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub black: Option<String>,
    /// JSON truthiness, so `1` and `"yes"` count as rated.
    #[serde(default, deserialize_with = "truthy")]
    pub rated: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub speed: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_control: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    /// Epoch milliseconds, as an integer, a float or a string.
    #[serde(default)]
    pub last_move_at: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub opening: Option<LichessOpening>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LichessPlayers {
    #[serde(default, deserialize_with = "lenient")]
    pub white: Option<LichessPlayer>,
    #[serde(default, deserialize_with = "lenient")]
    pub black: Option<LichessPlayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LichessPlayer {
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<LichessUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LichessUser {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LichessOpening {
    Name(String),
    Detailed { name: Option<String> },
}

impl LichessOpening {
    pub fn name(&self) -> Option<&str> {
        match self {
            LichessOpening::Name(name) => Some(name),
            LichessOpening::Detailed { name } => name.as_deref(),
        }
    }
}

/// lichess game export API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LichessApi: Send + Sync {
    /// Streams up to `max` of the user's bullet, blitz and rapid games, PGN included.
    async fn export_games(
        &self,
        username: &str,
        max: u32,
    ) -> Result<NdjsonStream<LichessGame>, LichessClientError>;
}

pub struct LichessClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl LichessClient {
    pub fn new(base_url: &str) -> Result<Self, LichessClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LichessClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LichessApi for LichessClient {
    async fn export_games(
        &self,
        username: &str,
        max: u32,
    ) -> Result<NdjsonStream<LichessGame>, LichessClientError> {
        let url = format!("{}/api/games/user/{}", self.base_url, username);
        debug!(username = %username, max = max, "Requesting lichess game export");

        let max = max.to_string();
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("max", max.as_str()),
                ("moves", "true"),
                ("pgnInJson", "true"),
                ("clocks", "false"),
                ("opening", "true"),
                ("perfType", EXPORTED_PERF_TYPES),
            ])
            .header(ACCEPT, "application/x-ndjson")
            .timeout(EXPORT_TIMEOUT)
            .send()
            .await
            .map_err(|e| LichessClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LichessClientError::UserNotFound(username.to_string()));
        }

        Ok(NdjsonStream::new(response.bytes_stream()))
    }
}
