pub mod document_store;
pub mod dynamodb_document_store;
pub mod errors;
pub mod in_memory_document_store;
