use std::sync::Arc;
use std::time::Duration;

use schoolmis_config::{AuthConfig, CorsConfig, MongoConfig, ServerConfig};
use schoolmis_db::{DocumentStore, MemoryStore, MongoStore, StoreSelector};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct AppState {
    pub stores: StoreSelector,
    pub auth_config: AuthConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
    /// `None` when running memory-only.
    pub mongo_config: Option<MongoConfig>,
}

impl AppState {
    /// State around an existing selector with default settings elsewhere.
    pub fn with_stores(stores: StoreSelector) -> Self {
        Self {
            stores,
            auth_config: AuthConfig::default(),
            cors_config: CorsConfig::default(),
            server_config: ServerConfig::default(),
            mongo_config: None,
        }
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        self.stores.memory()
    }
}

pub fn fallback_store(auth_config: &AuthConfig) -> Arc<MemoryStore> {
    let account = &auth_config.fallback;
    Arc::new(MemoryStore::with_fallback_account(
        &account.username,
        &account.password,
        &account.role,
    ))
}

pub async fn init_app_state() -> AppState {
    let auth_config = AuthConfig::from_env();
    let mongo_config = MongoConfig::from_env();
    let memory = fallback_store(&auth_config);

    let (stores, mongo, mongo_config) = if mongo_config.disabled {
        info!("MONGODB_DISABLED is set, serving from memory only");
        (StoreSelector::memory_only(memory), None, None)
    } else {
        match MongoStore::connect(&mongo_config).await {
            Ok(mongo) => {
                let mongo = Arc::new(mongo);
                let primary: Arc<dyn DocumentStore> = mongo.clone();
                let stores = StoreSelector::with_primary(
                    memory,
                    primary,
                    Duration::from_secs(mongo_config.retry_after_secs),
                    Duration::from_millis(mongo_config.probe_timeout_ms),
                );
                (stores, Some(mongo), Some(mongo_config))
            }
            Err(e) => {
                warn!(error = %e, "Invalid MongoDB configuration, serving from memory only");
                (StoreSelector::memory_only(memory), None, None)
            }
        }
    };

    if let Some(mongo) = mongo {
        if stores.try_connect().await {
            info!("Connected to MongoDB");
            if let Err(e) = mongo.ensure_indexes().await {
                warn!(error = %e, "Could not create unique indexes");
            }
        } else {
            warn!(
                error = %stores.monitor().last_error().unwrap_or_default(),
                "MongoDB unreachable, using in-memory fallback"
            );
        }
    }

    AppState {
        stores,
        auth_config,
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
        mongo_config,
    }
}
