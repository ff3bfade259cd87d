use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::instrument;

use crate::collection::Collection;
use crate::document::{Document, Filter, ID_FIELD, id_of};
use crate::error::StoreError;
use crate::store::DocumentStore;

/// A record type stored in one collection.
pub trait Resource: DeserializeOwned + Send {
    const COLLECTION: Collection;
}

/// Typed access to the collection of `R` on whichever store was selected.
pub struct Repository<'a, R> {
    store: &'a dyn DocumentStore,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> Repository<'a, R> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    #[instrument(skip(self), fields(collection = %R::COLLECTION))]
    pub async fn list(&self, filter: &Filter) -> Result<Vec<R>, StoreError> {
        self.store
            .list(R::COLLECTION, filter)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<R>, StoreError> {
        self.store
            .find_one(R::COLLECTION, filter)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn get(&self, id: &str) -> Result<R, StoreError> {
        decode(self.store.get(R::COLLECTION, id).await?)
    }

    #[instrument(skip(self, dto), fields(collection = %R::COLLECTION))]
    pub async fn create<D: Serialize + Sync>(&self, dto: &D) -> Result<R, StoreError> {
        let doc = encode(dto)?;
        self.ensure_unique(&doc, None).await?;
        decode(self.store.create(R::COLLECTION, doc).await?)
    }

    /// Applies the fields present in `dto`; absent fields keep their value.
    #[instrument(skip(self, dto), fields(collection = %R::COLLECTION))]
    pub async fn update<D: Serialize + Sync>(&self, id: &str, dto: &D) -> Result<R, StoreError> {
        let patch = encode(dto)?;
        self.ensure_unique(&patch, Some(id)).await?;
        decode(self.store.update(R::COLLECTION, id, patch).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(R::COLLECTION, id).await
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(R::COLLECTION).await
    }

    /// Read-then-write, so two concurrent writes can both pass. The document
    /// store closes that gap with unique indexes (`MongoStore::ensure_indexes`);
    /// the memory store does not.
    async fn ensure_unique(&self, doc: &Document, own_id: Option<&str>) -> Result<(), StoreError> {
        for &field in R::COLLECTION.unique_fields() {
            let Some(value) = doc.get(field).and_then(Value::as_str) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            let existing = self
                .store
                .find_one(R::COLLECTION, &Filter::new().eq(field, value))
                .await?;
            let taken = existing.is_some_and(|other| id_of(&other) != own_id);
            if taken {
                return Err(StoreError::Duplicate {
                    entity: R::COLLECTION.entity_name(),
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Serialises a DTO, dropping nulls so that partial updates only touch
/// the fields that were sent.
fn encode<D: Serialize>(dto: &D) -> Result<Document, StoreError> {
    match serde_json::to_value(dto)? {
        Value::Object(mut map) => {
            map.retain(|key, value| !value.is_null() && key != ID_FIELD);
            Ok(map)
        }
        other => Err(StoreError::Backend(format!(
            "expected an object, got {other}"
        ))),
    }
}

fn decode<R: DeserializeOwned>(doc: Document) -> Result<R, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}
