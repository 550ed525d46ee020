use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_item};
use tracing::debug;

use crate::repositories::document_store::{stamp_document, Document, DocumentStore, Filter};
use crate::repositories::errors::document_store_errors::DocumentStoreError;

/// Document store backed by DynamoDB. Each collection is its own table named
/// `{database_name}-{collection}` with partition key `id`.
pub struct DynamoDbDocumentStore {
    pub client: Client,
    pub database_name: String,
}

impl DynamoDbDocumentStore {
    pub fn new(client: Client, database_name: &str) -> Self {
        Self {
            client,
            database_name: database_name.to_string(),
        }
    }

    /// Builds a client from the ambient AWS configuration, optionally pointed at
    /// a non-default endpoint such as DynamoDB Local.
    pub async fn connect(endpoint_url: Option<&str>, database_name: &str) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let config = loader.load().await;
        Self::new(Client::new(&config), database_name)
    }

    fn table_name(&self, collection: &str) -> String {
        format!("{}-{}", self.database_name, collection)
    }

    async fn scan(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let table_name = self.table_name(collection);
        let scan_filter = ScanFilter::build(filter);
        let mut documents = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        // Scan applies the filter after reading each page, so keep paging until
        // enough matches are collected or the table is exhausted.
        while documents.len() < limit {
            let mut request = self
                .client
                .scan()
                .table_name(&table_name)
                .set_exclusive_start_key(start_key.take());
            if let Some(scan_filter) = &scan_filter {
                request = request
                    .filter_expression(&scan_filter.expression)
                    .set_expression_attribute_names(Some(scan_filter.names.clone()))
                    .set_expression_attribute_values(Some(scan_filter.values.clone()));
            }

            let output = request
                .send()
                .await
                .map_err(|e| DocumentStoreError::Backend(e.to_string()))?;

            for item in output.items.unwrap_or_default() {
                if documents.len() >= limit {
                    break;
                }
                let document: Document = from_item(item)
                    .map_err(|e| DocumentStoreError::Serialization(e.to_string()))?;
                documents.push(document);
            }

            match output.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        debug!(
            "Scanned {} for {:?}: {} document(s)",
            table_name,
            filter,
            documents.len()
        );
        Ok(documents)
    }
}

/// Filter expression equivalent of an exact-match [`Filter`]. Field names go
/// through placeholders so reserved words such as `source` are safe.
#[derive(Debug, Clone, PartialEq)]
struct ScanFilter {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl ScanFilter {
    fn build(filter: &Filter) -> Option<Self> {
        if filter.is_empty() {
            return None;
        }

        let mut conditions = Vec::with_capacity(filter.len());
        let mut names = HashMap::new();
        let mut values = HashMap::new();
        for (i, (field, value)) in filter.iter().enumerate() {
            names.insert(format!("#f{}", i), field.clone());
            values.insert(format!(":v{}", i), AttributeValue::S(value.clone()));
            conditions.push(format!("#f{} = :v{}", i, i));
        }

        Some(ScanFilter {
            expression: conditions.join(" AND "),
            names,
            values,
        })
    }
}

#[async_trait]
impl DocumentStore for DynamoDbDocumentStore {
    async fn create(&self, collection: &str, document: Document) -> Result<(), DocumentStoreError> {
        let item: HashMap<String, AttributeValue> = to_item(stamp_document(document))
            .map_err(|e| DocumentStoreError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(self.table_name(collection))
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DocumentStoreError> {
        Ok(self.scan(collection, filter, 1).await?.into_iter().next())
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        self.scan(collection, filter, limit).await
    }

    async fn list_collections(&self) -> Result<Vec<String>, DocumentStoreError> {
        let prefix = format!("{}-", self.database_name);
        let output = self
            .client
            .list_tables()
            .send()
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?;

        Ok(output
            .table_names
            .unwrap_or_default()
            .into_iter()
            .filter_map(|name| name.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }
}
