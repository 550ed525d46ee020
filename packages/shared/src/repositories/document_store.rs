use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::repositories::errors::document_store_errors::DocumentStoreError;

#[cfg(test)]
use mockall::automock;

/// A stored record: a JSON object with arbitrary fields.
pub type Document = Map<String, Value>;

/// Exact-match conditions on top-level string fields. An empty filter matches everything.
pub type Filter = BTreeMap<String, String>;

/// Gateway over the document datastore. Collections are addressed by name.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends `document` to `collection`, adding `id`, `created_at` and `updated_at`.
    async fn create(&self, collection: &str, document: Document) -> Result<(), DocumentStoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DocumentStoreError>;

    /// Up to `limit` matching documents in storage order.
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    async fn list_collections(&self) -> Result<Vec<String>, DocumentStoreError>;
}

/// Adds the envelope fields every stored document carries.
pub(crate) fn stamp_document(mut document: Document) -> Document {
    let now = Value::String(Utc::now().to_rfc3339());
    document.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    document.insert("created_at".to_string(), now.clone());
    document.insert("updated_at".to_string(), now);
    document
}

pub(crate) fn matches_filter(document: &Document, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field).and_then(Value::as_str) == Some(expected))
}
