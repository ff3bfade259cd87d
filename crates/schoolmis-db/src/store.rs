use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::collection::Collection;
use crate::document::{Document, Filter};
use crate::error::StoreError;

/// Which backend served a request. Serialises to the `source` values the
/// API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreSource {
    Mongodb,
    Memory,
}

impl StoreSource {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreSource::Mongodb => "mongodb",
            StoreSource::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD over named collections of JSON documents.
///
/// Implementations assign `_id`, `createdAt` and `updatedAt`. `update` merges
/// the given fields into the stored document; `get`, `update` and `delete`
/// answer [`StoreError::NotFound`] for unknown ids.
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug {
    fn source(&self) -> StoreSource;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn list(&self, collection: Collection, filter: &Filter)
    -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.list(collection, filter).await?.into_iter().next())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError>;

    async fn create(&self, collection: Collection, doc: Document) -> Result<Document, StoreError>;

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Document, StoreError>;

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;

    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Removes every document in the collection, returning how many went.
    async fn clear(&self, collection: Collection) -> Result<u64, StoreError>;
}
