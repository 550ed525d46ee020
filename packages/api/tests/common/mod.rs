#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use api::config::Config;
use api::create_app;
use api::state::AppState;
use axum_test::TestServer;
use serde_json::{json, Value};
use shared::clients::chesscom_client::ChessComClient;
use shared::clients::lichess_client::LichessClient;
use shared::repositories::document_store::DocumentStore;
use shared::repositories::in_memory_document_store::InMemoryDocumentStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running app backed by the in-memory store, with both platforms served by wiremock.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryDocumentStore>,
    pub chesscom: MockServer,
    pub lichess: MockServer,
}

pub fn test_config(chesscom_url: &str, lichess_url: &str) -> Config {
    let vars = HashMap::from([
        ("DATABASE_URL", "memory".to_string()),
        ("CHESSCOM_API_URL", chesscom_url.to_string()),
        ("LICHESS_API_URL", lichess_url.to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config should be valid")
}

pub async fn spawn_app() -> TestApp {
    let store = Arc::new(InMemoryDocumentStore::new());
    spawn_app_with_store(store.clone(), store).await
}

pub async fn spawn_app_with_store(
    store: Arc<dyn DocumentStore + Send + Sync>,
    in_memory: Arc<InMemoryDocumentStore>,
) -> TestApp {
    let chesscom = MockServer::start().await;
    let lichess = MockServer::start().await;

    let config = test_config(&chesscom.uri(), &lichess.uri());
    let chesscom_api = Arc::new(ChessComClient::new(&chesscom.uri()).expect("chess.com client"));
    let lichess_api = Arc::new(LichessClient::new(&lichess.uri()).expect("lichess client"));

    let app = create_app(AppState::new(config, store, chesscom_api, lichess_api));
    let server = TestServer::new(app).expect("Failed to start test server");

    TestApp {
        server,
        store: in_memory,
        chesscom,
        lichess,
    }
}

pub fn archive_url(server: &MockServer, username: &str, month: &str) -> String {
    format!("{}/pub/player/{}/games/{}", server.uri(), username, month)
}

/// Serves the archive index of `username` listing `months` oldest first.
pub async fn mount_archive_index(server: &MockServer, username: &str, months: &[&str]) {
    let archives: Vec<String> = months
        .iter()
        .map(|month| archive_url(server, username, month))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/pub/player/{}/games/archives", username)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "archives": archives })))
        .mount(server)
        .await;
}

/// Serves one monthly archive and expects it to be fetched `times` times.
pub async fn mount_archive(
    server: &MockServer,
    username: &str,
    month: &str,
    games: Vec<Value>,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/pub/player/{}/games/{}", username, month)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "games": games })))
        .expect(times)
        .mount(server)
        .await;
}

pub fn chesscom_games(username: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|n| {
            json!({
                "pgn": format!("[Event \"Live Chess\"]\n1. e4 e5 2. Nf3 Nc6 {}", n),
                "white": {"username": username, "result": "win"},
                "black": {"username": format!("opponent{}", n), "result": "checkmated"},
                "rated": true,
                "time_control": "180+2",
                "time_class": "blitz",
                "end_time": 1_706_745_600 + n as i64
            })
        })
        .collect()
}

pub fn lichess_export(username: &str, count: usize) -> String {
    (0..count)
        .map(|n| {
            json!({
                "id": format!("lichess{}", n),
                "rated": true,
                "speed": "rapid",
                "status": "resign",
                "pgn": format!("[Site \"lichess.org\"]\n1. d4 d5 {}", n),
                "players": {
                    "white": {"user": {"name": username}},
                    "black": {"user": {"name": "someone"}}
                },
                "opening": {"name": "Queen's Gambit"},
                "lastMoveAt": 1_700_000_000_000i64 + n as i64
            })
            .to_string()
                + "\n"
        })
        .collect()
}

pub async fn mount_lichess_export(server: &MockServer, username: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/api/games/user/{}", username)))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .mount(server)
        .await;
}
