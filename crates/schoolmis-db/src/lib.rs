//! # School MIS DB
//!
//! Persistence for the School MIS API. Every resource is stored as a JSON
//! document in a named [`Collection`]; two [`DocumentStore`] backends exist:
//!
//! - [`MongoStore`]: the document store proper (MongoDB)
//! - [`MemoryStore`]: an in-process, non-persistent fallback
//!
//! A [`StoreSelector`] picks the backend once per request. It consults a
//! [`ConnectionMonitor`], a small circuit breaker that opens when the document
//! store reports itself unreachable and probes it again after a cool-down.
//! [`Repository`] layers typed records on top of whichever store was picked.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use schoolmis_db::{MemoryStore, Repository, StoreSelector};
//!
//! let selector = StoreSelector::memory_only(Arc::new(MemoryStore::new()));
//! let store = selector.select().await;
//! let schools = Repository::<School>::new(store.as_ref()).list(&Filter::new()).await?;
//! ```

pub mod collection;
pub mod document;
pub mod error;
pub mod memory;
pub mod mongo;
pub mod monitor;
pub mod repository;
pub mod selector;
pub mod store;

pub use collection::Collection;
pub use document::{Document, Filter};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use monitor::{ConnectionMonitor, ReadyState};
pub use repository::{Repository, Resource};
pub use selector::StoreSelector;
pub use store::{DocumentStore, StoreSource};
