use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::collection::Collection;
use crate::document::{Document, Filter};
use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::monitor::{ConnectionMonitor, ReadyState};
use crate::store::{DocumentStore, StoreSource};

/// Chooses the backend for one request.
///
/// The choice is made once, by [`StoreSelector::select`], and holds for the
/// rest of the request. A request that loses the document store half way
/// fails with the store's error; the requests after it go to memory until a
/// probe succeeds.
#[derive(Debug, Clone)]
pub struct StoreSelector {
    memory: Arc<MemoryStore>,
    primary: Option<Arc<dyn DocumentStore>>,
    monitor: Arc<ConnectionMonitor>,
    probe_timeout: Duration,
}

impl StoreSelector {
    pub fn memory_only(memory: Arc<MemoryStore>) -> Self {
        Self {
            memory,
            primary: None,
            monitor: Arc::new(ConnectionMonitor::new(Duration::MAX)),
            probe_timeout: Duration::ZERO,
        }
    }

    pub fn with_primary(
        memory: Arc<MemoryStore>,
        primary: Arc<dyn DocumentStore>,
        retry_after: Duration,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            memory,
            primary: Some(primary),
            monitor: Arc::new(ConnectionMonitor::new(retry_after)),
            probe_timeout,
        }
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.memory
    }

    pub fn monitor(&self) -> &Arc<ConnectionMonitor> {
        &self.monitor
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn ready_state(&self) -> ReadyState {
        self.monitor.state()
    }

    /// Pings the document store if the breaker allows it, updating the
    /// monitor with the outcome. Returns whether the store is usable.
    pub async fn try_connect(&self) -> bool {
        let Some(primary) = &self.primary else {
            return false;
        };
        if self.monitor.state().is_connected() {
            return true;
        }
        if !self.monitor.begin_probe() {
            return false;
        }

        let mut probe = ProbeGuard::new(&self.monitor);
        let outcome = tokio::time::timeout(self.probe_timeout, primary.ping()).await;
        probe.settle();

        match outcome {
            Ok(Ok(())) => {
                self.monitor.mark_connected();
                true
            }
            Ok(Err(err)) => {
                self.monitor.record_failure(&err.to_string());
                false
            }
            Err(_) => {
                self.monitor.record_failure("ping timed out");
                false
            }
        }
    }

    pub async fn select(&self) -> Arc<dyn DocumentStore> {
        let Some(primary) = &self.primary else {
            return self.memory.clone();
        };

        if self.try_connect().await {
            return Arc::new(MonitoredStore {
                inner: primary.clone(),
                monitor: self.monitor.clone(),
            });
        }

        debug!(
            state = self.monitor.state().label(),
            "Document store unavailable, using memory"
        );
        self.memory.clone()
    }
}

/// Holds a claimed probe. Dropping it unsettled, as happens when the request
/// that started the probe is cancelled, reopens the breaker so that a later
/// request can probe again.
struct ProbeGuard<'a> {
    monitor: &'a ConnectionMonitor,
    settled: bool,
}

impl<'a> ProbeGuard<'a> {
    fn new(monitor: &'a ConnectionMonitor) -> Self {
        Self {
            monitor,
            settled: false,
        }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.monitor.record_failure("probe cancelled");
        }
    }
}

/// Passes calls through to the document store and opens the breaker when
/// one of them reports the store unreachable.
#[derive(Debug)]
struct MonitoredStore {
    inner: Arc<dyn DocumentStore>,
    monitor: Arc<ConnectionMonitor>,
}

impl MonitoredStore {
    fn observe<T>(&self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if let Err(err) = &result {
            if err.is_unavailable() {
                warn!(error = %err, "Document store call failed");
                self.monitor.record_failure(&err.to_string());
            }
        }
        result
    }
}

#[async_trait]
impl DocumentStore for MonitoredStore {
    fn source(&self) -> StoreSource {
        self.inner.source()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.observe(self.inner.ping().await)
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        self.observe(self.inner.list(collection, filter).await)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.observe(self.inner.find_one(collection, filter).await)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StoreError> {
        self.observe(self.inner.get(collection, id).await)
    }

    async fn create(&self, collection: Collection, doc: Document) -> Result<Document, StoreError> {
        self.observe(self.inner.create(collection, doc).await)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Document, StoreError> {
        self.observe(self.inner.update(collection, id, patch).await)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.observe(self.inner.delete(collection, id).await)
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.observe(self.inner.count(collection).await)
    }

    async fn clear(&self, collection: Collection) -> Result<u64, StoreError> {
        self.observe(self.inner.clear(collection).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory-backed store that claims to be the document store and can be
    /// switched off.
    #[derive(Debug, Default)]
    struct SwitchableStore {
        inner: MemoryStore,
        down: AtomicBool,
        slow_ping: AtomicBool,
    }

    impl SwitchableStore {
        fn check(&self) -> Result<(), StoreError> {
            if self.down.load(Ordering::SeqCst) {
                Err(StoreError::Unavailable("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl DocumentStore for SwitchableStore {
        fn source(&self) -> StoreSource {
            StoreSource::Mongodb
        }

        async fn ping(&self) -> Result<(), StoreError> {
            if self.slow_ping.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
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

        async fn create(
            &self,
            collection: Collection,
            doc: Document,
        ) -> Result<Document, StoreError> {
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

    fn selector(primary: Arc<SwitchableStore>, retry_after: Duration) -> StoreSelector {
        StoreSelector::with_primary(
            Arc::new(MemoryStore::new()),
            primary,
            retry_after,
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn test_memory_only_always_selects_memory() {
        let selector = StoreSelector::memory_only(Arc::new(MemoryStore::new()));
        assert_eq!(selector.select().await.source(), StoreSource::Memory);
        assert_eq!(selector.ready_state(), ReadyState::Disconnected);
        assert!(!selector.has_primary());
    }

    #[tokio::test]
    async fn test_reachable_primary_is_selected() {
        let selector = selector(Arc::new(SwitchableStore::default()), Duration::ZERO);
        assert_eq!(selector.select().await.source(), StoreSource::Mongodb);
        assert!(selector.ready_state().is_connected());
    }

    #[tokio::test]
    async fn test_failure_mid_request_falls_back_on_next_request() {
        let primary = Arc::new(SwitchableStore::default());
        let selector = selector(primary.clone(), Duration::from_secs(3600));

        let store = selector.select().await;
        assert_eq!(store.source(), StoreSource::Mongodb);

        primary.down.store(true, Ordering::SeqCst);
        let err = store.count(Collection::Schools).await.unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(selector.ready_state(), ReadyState::Disconnected);

        // Still inside the cool-down, so no probe and no error.
        primary.down.store(false, Ordering::SeqCst);
        assert_eq!(selector.select().await.source(), StoreSource::Memory);
    }

    #[tokio::test]
    async fn test_probe_recloses_after_cool_down() {
        let primary = Arc::new(SwitchableStore::default());
        primary.down.store(true, Ordering::SeqCst);
        let selector = selector(primary.clone(), Duration::ZERO);

        assert_eq!(selector.select().await.source(), StoreSource::Memory);
        assert!(selector.monitor().last_error().is_some());

        primary.down.store(false, Ordering::SeqCst);
        assert_eq!(selector.select().await.source(), StoreSource::Mongodb);
    }

    #[tokio::test]
    async fn test_not_found_does_not_open_the_breaker() {
        let selector = selector(Arc::new(SwitchableStore::default()), Duration::from_secs(3600));
        let store = selector.select().await;

        assert!(store.get(Collection::Schools, "missing").await.is_err());
        assert!(selector.ready_state().is_connected());
    }

    #[tokio::test]
    async fn test_cancelled_probe_lets_a_later_request_reconnect() {
        let primary = Arc::new(SwitchableStore::default());
        primary.slow_ping.store(true, Ordering::SeqCst);
        let selector = selector(primary.clone(), Duration::ZERO);

        let probing = tokio::spawn({
            let selector = selector.clone();
            async move { selector.select().await.source() }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(selector.ready_state(), ReadyState::Connecting);

        probing.abort();
        assert!(probing.await.unwrap_err().is_cancelled());
        assert_eq!(selector.ready_state(), ReadyState::Disconnected);
        assert_eq!(
            selector.monitor().last_error().as_deref(),
            Some("probe cancelled")
        );

        primary.slow_ping.store(false, Ordering::SeqCst);
        assert_eq!(selector.select().await.source(), StoreSource::Mongodb);
        assert!(selector.ready_state().is_connected());
    }
}
