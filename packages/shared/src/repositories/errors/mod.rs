pub mod document_store_errors;
