use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::clients::errors::chesscom_client_errors::ChessComClientError;
use crate::clients::lenient::{lenient, truthy};

#[cfg(test)]
use mockall::automock;

pub const CHESSCOM_BASE_URL: &str = "https://api.chess.com";
const USER_AGENT: &str = concat!("chess-archive/", env!("CARGO_PKG_VERSION"));
const ARCHIVE_INDEX_TIMEOUT: Duration = Duration::from_secs(20);
const ARCHIVE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Default, Deserialize)]
struct ArchiveIndex {
    #[serde(default)]
    archives: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Archive {
    #[serde(default)]
    games: Vec<Value>,
}

/// One game of a monthly archive, as chess.com reports it. A field of an
/// unexpected type is left absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChessComGame {
    #[serde(default, deserialize_with = "lenient")]
    pub pgn: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub white: Option<ChessComPlayer>,
    #[serde(default, deserialize_with = "lenient")]
    pub black: Option<ChessComPlayer>,
    #[serde(default, deserialize_with = "truthy")]
    pub rated: Option<bool>,
    /// Usually a string such as `"180+2"`, but kept loose.
    #[serde(default)]
    pub time_control: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_class: Option<String>,
    /// Epoch seconds.
    #[serde(default)]
    pub end_time: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChessComPlayer {
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<String>,
}

/// chess.com published-data API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChessComApi: Send + Sync {
    /// URLs of the user's monthly archives, oldest first.
    async fn fetch_archive_index(&self, username: &str) -> Result<Vec<String>, ChessComClientError>;

    /// Raw game objects of one monthly archive, in the order chess.com returns them.
    async fn fetch_archive(&self, archive_url: &str) -> Result<Vec<Value>, ChessComClientError>;
}

pub struct ChessComClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ChessComClient {
    pub fn new(base_url: &str) -> Result<Self, ChessComClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ChessComClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChessComApi for ChessComClient {
    async fn fetch_archive_index(&self, username: &str) -> Result<Vec<String>, ChessComClientError> {
        let url = format!("{}/pub/player/{}/games/archives", self.base_url, username);
        debug!(username = %username, url = %url, "Fetching chess.com archive index");

        let response = self
            .http_client
            .get(&url)
            .timeout(ARCHIVE_INDEX_TIMEOUT)
            .send()
            .await
            .map_err(|e| ChessComClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChessComClientError::UserNotFound(username.to_string()));
        }

        let index: ArchiveIndex = response
            .json()
            .await
            .map_err(|e| ChessComClientError::Parse(e.to_string()))?;

        Ok(index.archives)
    }

    async fn fetch_archive(&self, archive_url: &str) -> Result<Vec<Value>, ChessComClientError> {
        debug!(url = %archive_url, "Fetching chess.com archive");

        let response = self
            .http_client
            .get(archive_url)
            .timeout(ARCHIVE_TIMEOUT)
            .send()
            .await
            .map_err(|e| ChessComClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChessComClientError::Api(status.as_u16(), body));
        }

        let archive: Archive = response
            .json()
            .await
            .map_err(|e| ChessComClientError::Parse(e.to_string()))?;

        Ok(archive.games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_archive_index_returns_urls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pub/player/magnus/games/archives"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "archives": [
                    format!("{}/pub/player/magnus/games/2024/01", server.uri()),
                    format!("{}/pub/player/magnus/games/2024/02", server.uri()),
                ]
            })))
            .mount(&server)
            .await;

        let client = ChessComClient::new(&server.uri()).unwrap();
        let archives = client.fetch_archive_index("magnus").await.unwrap();

        assert_eq!(archives.len(), 2);
        assert!(archives[1].ends_with("/2024/02"));
    }

    #[tokio::test]
    async fn test_fetch_archive_index_unknown_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pub/player/nobody/games/archives"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"code": 0})))
            .mount(&server)
            .await;

        let client = ChessComClient::new(&server.uri()).unwrap();
        let result = client.fetch_archive_index("nobody").await;

        match result {
            Err(ChessComClientError::UserNotFound(username)) => assert_eq!(username, "nobody"),
            other => panic!("expected UserNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_archive_index_without_archives_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pub/player/fresh/games/archives"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = ChessComClient::new(&server.uri()).unwrap();
        assert!(client.fetch_archive_index("fresh").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_archive_returns_raw_games() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pub/player/magnus/games/2024/02"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "games": [
                    {"pgn": "1. e4 e5", "time_class": "blitz"},
                    {"time_class": "rapid"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ChessComClient::new(&server.uri()).unwrap();
        let games = client
            .fetch_archive(&format!("{}/pub/player/magnus/games/2024/02", server.uri()))
            .await
            .unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0]["pgn"], "1. e4 e5");
    }

    #[tokio::test]
    async fn test_fetch_archive_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pub/player/magnus/games/2024/03"))
            .respond_with(ResponseTemplate::new(410).set_body_string("gone"))
            .mount(&server)
            .await;

        let client = ChessComClient::new(&server.uri()).unwrap();
        let result = client
            .fetch_archive(&format!("{}/pub/player/magnus/games/2024/03", server.uri()))
            .await;

        assert!(matches!(result, Err(ChessComClientError::Api(410, body)) if body == "gone"));
    }

    #[test]
    fn test_chesscom_game_tolerates_missing_fields() {
        let game: ChessComGame = serde_json::from_value(json!({
            "white": {"username": "Hikaru"},
            "end_time": 1700000000
        }))
        .unwrap();

        assert!(game.pgn.is_none());
        assert_eq!(
            game.white.and_then(|w| w.username).as_deref(),
            Some("Hikaru")
        );
        assert!(game.black.is_none());
        assert_eq!(game.end_time, Some(json!(1700000000)));
    }
}
