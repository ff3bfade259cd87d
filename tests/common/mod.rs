#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use schoolmis::router::init_router;
use schoolmis::state::{AppState, fallback_store};
use schoolmis_config::AuthConfig;
use schoolmis_db::{
    Collection, Document, DocumentStore, Filter, MemoryStore, StoreError, StoreSelector,
    StoreSource,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tower::ServiceExt;

pub const DEMO_TOKEN: &str = "demo-jwt-token";
pub const STORE_TOKEN: &str = "real-jwt-token-from-db";

/// Memory-backed stand-in for MongoDB that can be taken offline.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    down: AtomicBool,
}

impl FlakyStore {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(
                "server selection timeout: connection refused".into(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    fn source(&self) -> StoreSource {
        StoreSource::Mongodb
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        self.check()?;
        self.inner.list(collection, filter).await
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        self.check()?;
        self.inner.get(collection, id).await
    }

    async fn create(&self, collection: Collection, doc: Document) -> Result<Document, StoreError> {
        self.check()?;
        self.inner.create(collection, doc).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Document, StoreError> {
        self.check()?;
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(collection, id).await
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.check()?;
        self.inner.count(collection).await
    }

    async fn clear(&self, collection: Collection) -> Result<u64, StoreError> {
        self.check()?;
        self.inner.clear(collection).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub primary: Option<Arc<FlakyStore>>,
}

impl TestApp {
    pub fn memory(&self) -> &Arc<MemoryStore> {
        self.state.memory()
    }

    pub fn primary(&self) -> &Arc<FlakyStore> {
        self.primary
            .as_ref()
            .expect("app was built without a document store")
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(DEMO_TOKEN), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(DEMO_TOKEN), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(DEMO_TOKEN), Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, Some(DEMO_TOKEN), None).await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Creates a school and returns its id.
    pub async fn create_school(&self, name: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/schools",
                json!({ "name": name, "address": "1 Main St" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["_id"].as_str().unwrap().to_string()
    }
}

fn build(stores: StoreSelector, primary: Option<Arc<FlakyStore>>) -> TestApp {
    let state = AppState::with_stores(stores);
    let router = init_router(state.clone(), None);
    TestApp {
        router,
        state,
        primary,
    }
}

/// An app with no document store configured.
pub fn setup_memory_app() -> TestApp {
    let memory = fallback_store(&AuthConfig::default());
    build(StoreSelector::memory_only(memory), None)
}

/// An app whose document store is reachable until the test says otherwise.
/// A failure keeps it in memory mode for an hour.
pub fn setup_connected_app() -> TestApp {
    let memory = fallback_store(&AuthConfig::default());
    let primary = Arc::new(FlakyStore::default());
    let stores = StoreSelector::with_primary(
        memory,
        primary.clone(),
        Duration::from_secs(3600),
        Duration::from_secs(1),
    );
    build(stores, Some(primary))
}

/// Adds a user to the document store's `users` collection.
pub async fn insert_store_user(store: &FlakyStore, username: &str, password: &str, role: &str) {
    let user = json!({ "username": username, "password": password, "role": role });
    store
        .inner
        .create(Collection::Users, user.as_object().cloned().unwrap())
        .await
        .unwrap();
}
