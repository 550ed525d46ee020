use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::game::{Game, StoredGame, GAME_COLLECTION};
use crate::models::games::requests::{GamesQuery, MAX_QUERY_LIMIT};
use crate::models::games::responses::GamesResponse;
use crate::repositories::document_store::{Document, DocumentStore, Filter};
use crate::services::errors::game_service_errors::GameServiceError;

/// Stores imported games and answers queries over them.
#[derive(Clone)]
pub struct GameService {
    store: Arc<dyn DocumentStore + Send + Sync>,
}

impl GameService {
    pub fn new(store: Arc<dyn DocumentStore + Send + Sync>) -> Self {
        GameService { store }
    }

    /// Inserts `game` unless one with the same source and PGN is already stored.
    /// Returns whether it was inserted.
    ///
    /// The lookup and the insert are separate calls, so two concurrent imports
    /// of the same game can both insert it.
    pub async fn insert_if_absent(&self, game: &Game) -> Result<bool, GameServiceError> {
        let key = Filter::from([
            ("source".to_string(), game.source.as_str().to_string()),
            ("pgn".to_string(), game.pgn.clone()),
        ]);

        if self.store.find_one(GAME_COLLECTION, &key).await?.is_some() {
            debug!("Skipping {} game already stored", game.source);
            return Ok(false);
        }

        self.store.create(GAME_COLLECTION, to_document(game)?).await?;
        Ok(true)
    }

    pub async fn list_games(&self, query: &GamesQuery) -> Result<GamesResponse, GameServiceError> {
        let limit = query.limit_or_default();
        if limit == 0 || limit > MAX_QUERY_LIMIT {
            return Err(GameServiceError::Validation(format!(
                "Limit must be between 1 and {}",
                MAX_QUERY_LIMIT
            )));
        }

        let mut filter = Filter::new();
        if let Some(source) = query.source.as_deref().filter(|s| !s.is_empty()) {
            filter.insert("source".to_string(), source.to_string());
        }
        if let Some(username) = query.username.as_deref().filter(|u| !u.is_empty()) {
            filter.insert("username".to_string(), username.to_string());
        }

        let documents = self
            .store
            .find_many(GAME_COLLECTION, &filter, limit as usize)
            .await?;

        let items: Vec<StoredGame> = documents
            .into_iter()
            .filter_map(|document| {
                let id = document.get("id").cloned();
                match serde_json::from_value(Value::Object(document)) {
                    Ok(game) => Some(game),
                    Err(e) => {
                        warn!("Skipping unreadable game document {:?}: {}", id, e);
                        None
                    }
                }
            })
            .collect();

        Ok(GamesResponse {
            count: items.len(),
            items,
        })
    }
}

fn to_document(game: &Game) -> Result<Document, GameServiceError> {
    match serde_json::to_value(game) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(GameServiceError::Serialization(format!(
            "Expected a JSON object, got {}",
            other
        ))),
        Err(e) => Err(GameServiceError::Serialization(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::GameSource;
    use crate::repositories::document_store::MockDocumentStore;
    use crate::repositories::errors::document_store_errors::DocumentStoreError;
    use crate::repositories::in_memory_document_store::InMemoryDocumentStore;
    use serde_json::json;

    fn game(source: GameSource, username: &str, pgn: &str) -> Game {
        Game::new(source, username, pgn)
    }

    #[tokio::test]
    async fn test_insert_if_absent_inserts_once() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let service = GameService::new(store.clone());
        let game = game(GameSource::Lichess, "alice", "1. e4 e5");

        assert!(service.insert_if_absent(&game).await.unwrap());
        assert!(!service.insert_if_absent(&game).await.unwrap());
        assert_eq!(store.count(GAME_COLLECTION).await, 1);
    }

    #[tokio::test]
    async fn test_same_pgn_from_other_source_is_not_a_duplicate() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let service = GameService::new(store.clone());

        assert!(service
            .insert_if_absent(&game(GameSource::Lichess, "alice", "1. e4"))
            .await
            .unwrap());
        assert!(service
            .insert_if_absent(&game(GameSource::Chesscom, "alice", "1. e4"))
            .await
            .unwrap());
        assert_eq!(store.count(GAME_COLLECTION).await, 2);
    }

    #[tokio::test]
    async fn test_insert_if_absent_looks_up_source_and_pgn() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_one()
            .withf(|collection, filter| {
                collection == GAME_COLLECTION
                    && filter.len() == 2
                    && filter["source"] == "chesscom"
                    && filter["pgn"] == "1. f4"
            })
            .times(1)
            .returning(|_, _| Ok(None));
        store
            .expect_create()
            .withf(|collection, document| {
                collection == GAME_COLLECTION && document["username"] == "magnus"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = GameService::new(Arc::new(store));
        let inserted = service
            .insert_if_absent(&game(GameSource::Chesscom, "magnus", "1. f4"))
            .await
            .unwrap();
        assert!(inserted);
    }

    #[tokio::test]
    async fn test_insert_if_absent_surfaces_store_failure() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_one()
            .returning(|_, _| Err(DocumentStoreError::Backend("unreachable".to_string())));
        store.expect_create().never();

        let service = GameService::new(Arc::new(store));
        let result = service
            .insert_if_absent(&game(GameSource::Lichess, "alice", "1. e4"))
            .await;

        assert!(matches!(
            result,
            Err(GameServiceError::Repository(DocumentStoreError::Backend(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_games_applies_both_filters_and_limit() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let service = GameService::new(store);
        for n in 0..15 {
            service
                .insert_if_absent(&game(GameSource::Lichess, "alice", &format!("1. e4 {}", n)))
                .await
                .unwrap();
        }
        service
            .insert_if_absent(&game(GameSource::Lichess, "bob", "1. d4"))
            .await
            .unwrap();
        service
            .insert_if_absent(&game(GameSource::Chesscom, "alice", "1. c4"))
            .await
            .unwrap();

        let query = GamesQuery {
            source: Some("lichess".to_string()),
            username: Some("alice".to_string()),
            limit: Some(10),
        };
        let response = service.list_games(&query).await.unwrap();

        assert_eq!(response.count, 10);
        assert_eq!(response.items.len(), 10);
        assert!(response
            .items
            .iter()
            .all(|g| g.game.source == GameSource::Lichess && g.game.username == "alice"));
    }

    #[tokio::test]
    async fn test_list_games_without_filters_uses_default_limit() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_many()
            .withf(|_, filter, limit| filter.is_empty() && *limit == 50)
            .returning(|_, _, _| Ok(vec![]));

        let service = GameService::new(Arc::new(store));
        let query = GamesQuery {
            source: Some(String::new()),
            username: None,
            limit: None,
        };
        let response = service.list_games(&query).await.unwrap();
        assert_eq!(response.count, 0);
    }

    #[tokio::test]
    async fn test_list_games_rejects_out_of_range_limit() {
        let mut store = MockDocumentStore::new();
        store.expect_find_many().never();
        let service = GameService::new(Arc::new(store));

        for limit in [0, 201] {
            let query = GamesQuery {
                limit: Some(limit),
                ..GamesQuery::default()
            };
            assert!(matches!(
                service.list_games(&query).await,
                Err(GameServiceError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_list_games_skips_unreadable_documents() {
        let mut store = MockDocumentStore::new();
        store.expect_find_many().returning(|_, _, _| {
            Ok(vec![
                json!({
                    "id": "1",
                    "source": "chesscom",
                    "username": "magnus",
                    "pgn": "1. e4",
                    "end_time": "2024-02-01T10:00:00Z",
                    "created_at": "2024-02-02T00:00:00+00:00",
                    "updated_at": "2024-02-02T00:00:00+00:00"
                })
                .as_object()
                .cloned()
                .unwrap(),
                json!({"id": "2", "source": "fide"}).as_object().cloned().unwrap(),
            ])
        });

        let service = GameService::new(Arc::new(store));
        let response = service.list_games(&GamesQuery::default()).await.unwrap();

        assert_eq!(response.count, 1);
        let item = serde_json::to_value(&response.items[0]).unwrap();
        assert_eq!(item["end_time"], "2024-02-01T10:00:00Z");
        assert_eq!(item["created_at"], "2024-02-02T00:00:00Z");
    }
}
