//! Record store: named JSON documents behind an injectable key-value trait.
//!
//! Malformed stored content is recovered here by substituting the document
//! type's default and logging the condition; a parse failure is never
//! propagated to a service.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod file;
pub mod memory;

/// Keys of the persisted documents.
pub mod keys {
    pub const LOGGED_IN: &str = "isLoggedIn";
    pub const SESSION_USER: &str = "demoUser";
    pub const INVENTORY: &str = "demoInventory";
    pub const TRANSACTIONS: &str = "demoTransactions";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value storage over string keys and string values. Single logical
/// writer; last write wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Reads a JSON document, falling back to the type's default when the key is
/// missing or its content does not parse.
pub async fn read_document<T>(store: &dyn RecordStore, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await? {
        None => Ok(T::default()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(key, %err, "stored document is malformed; substituting default");
                Ok(T::default())
            }
        },
    }
}

/// JSON-encodes a document and writes it under the given key.
pub async fn write_document<T>(store: &dyn RecordStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn read_document_defaults_on_missing_key() {
        let store = MemoryStore::new();
        let doc: Vec<String> = read_document(&store, "nope").await.unwrap();
        assert!(doc.is_empty());
    }

    #[tokio::test]
    async fn read_document_defaults_on_malformed_content() {
        let store = MemoryStore::new();
        store.set(keys::INVENTORY, "{not json").await.unwrap();
        let doc: Vec<String> = read_document(&store, keys::INVENTORY).await.unwrap();
        assert!(doc.is_empty());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = MemoryStore::new();
        let doc = vec!["potato".to_string(), "wheat".to_string()];
        write_document(&store, keys::INVENTORY, &doc).await.unwrap();
        let back: Vec<String> = read_document(&store, keys::INVENTORY).await.unwrap();
        assert_eq!(back, doc);
    }
}
