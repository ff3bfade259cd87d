//! In-process fallback store.
//!
//! Each collection is an ordered `Vec` of documents kept in insertion order.
//! Ids take the form `mem-<unix millis>-<counter>`, which never collides with
//! a document store id. Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::collection::Collection;
use crate::document::{CREATED_AT, Document, Filter, ID_FIELD, UPDATED_AT, id_of};
use crate::error::StoreError;
use crate::store::{DocumentStore, StoreSource};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    counter: AtomicU64,
    seed_users: Vec<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `users` collection holds the single fallback account.
    pub fn with_fallback_account(username: &str, password: &str, role: &str) -> Self {
        let mut user = Document::new();
        user.insert("username".into(), json!(username));
        user.insert("password".into(), json!(password));
        user.insert("role".into(), json!(role));

        let store = Self {
            seed_users: vec![user],
            ..Self::default()
        };
        store.reset();
        store
    }

    /// Drops every document and restores the seeded users.
    pub fn reset(&self) {
        let mut collections = self.collections.write();
        collections.clear();
        if !self.seed_users.is_empty() {
            let users = self
                .seed_users
                .iter()
                .cloned()
                .map(|mut user| {
                    self.stamp_new(&mut user);
                    user
                })
                .collect();
            collections.insert(Collection::Users, users);
        }
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }

    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("mem-{}-{}", Utc::now().timestamp_millis(), n)
    }

    fn stamp_new(&self, doc: &mut Document) {
        let now = json!(Utc::now());
        doc.insert(ID_FIELD.into(), Value::String(self.next_id()));
        doc.insert(CREATED_AT.into(), now.clone());
        doc.insert(UPDATED_AT.into(), now);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn source(&self) -> StoreSource {
        StoreSource::Memory
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read();
        let docs = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        self.collections
            .read()
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| id_of(doc) == Some(id)))
            .cloned()
            .ok_or(StoreError::NotFound(collection.entity_name()))
    }

    async fn create(
        &self,
        collection: Collection,
        mut doc: Document,
    ) -> Result<Document, StoreError> {
        self.stamp_new(&mut doc);

        let mut collections = self.collections.write();
        let docs = collections.entry(collection).or_default();
        docs.push(doc.clone());

        debug!(
            collection = %collection,
            id = id_of(&doc).unwrap_or_default(),
            total = docs.len(),
            "Saved document to memory"
        );
        Ok(doc)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Document, StoreError> {
        let mut collections = self.collections.write();
        let doc = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| id_of(doc) == Some(id)))
            .ok_or(StoreError::NotFound(collection.entity_name()))?;

        for (key, value) in patch {
            if key == ID_FIELD || key == CREATED_AT {
                continue;
            }
            doc.insert(key, value);
        }
        doc.insert(UPDATED_AT.into(), json!(Utc::now()));
        Ok(doc.clone())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let docs = collections
            .get_mut(&collection)
            .ok_or(StoreError::NotFound(collection.entity_name()))?;
        let index = docs
            .iter()
            .position(|doc| id_of(doc) == Some(id))
            .ok_or(StoreError::NotFound(collection.entity_name()))?;
        docs.remove(index);
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        Ok(self.len(collection) as u64)
    }

    async fn clear(&self, collection: Collection) -> Result<u64, StoreError> {
        let removed = self
            .collections
            .write()
            .remove(&collection)
            .map_or(0, |docs| docs.len());
        Ok(removed as u64)
    }
}
