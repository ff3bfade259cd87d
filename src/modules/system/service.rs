use chrono::Utc;
use schoolmis_db::{Collection, MemoryStore, ReadyState};
use schoolmis_models::system::{
    ConnectionInfo, DebugResponse, DemoCredentials, HealthResponse, MemoryCounts, MongoHealth,
    RootResponse,
};
use std::collections::BTreeMap;

use crate::state::AppState;

const ENDPOINTS: [(&str, &str); 7] = [
    ("login", "POST /api/v1/auth/login"),
    ("logout", "POST /api/v1/auth/logout"),
    ("students", "GET /api/v1/students"),
    ("schools", "GET /api/v1/schools"),
    ("stats", "GET /api/v1/stats"),
    ("health", "GET /health"),
    ("debug", "GET /debug"),
];

pub struct SystemService;

impl SystemService {
    pub fn banner(state: &AppState) -> RootResponse {
        let connected = state.stores.ready_state().is_connected();
        let account = &state.auth_config.fallback;

        RootResponse {
            message: "🏫 School MIS API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
            mongodb: if connected {
                "✅ CONNECTED"
            } else {
                "❌ DISCONNECTED"
            }
            .to_string(),
            endpoints: ENDPOINTS
                .iter()
                .map(|(name, route)| (name.to_string(), route.to_string()))
                .collect(),
            demo: DemoCredentials {
                username: account.username.clone(),
                password: account.password.clone(),
            },
        }
    }

    pub fn health(state: &AppState) -> HealthResponse {
        let ready = state.stores.ready_state();
        let memory = state.memory();

        HealthResponse {
            status: "OK".to_string(),
            timestamp: Utc::now(),
            mongodb: MongoHealth {
                state: ready.label().to_string(),
                ready_state: ready.as_u8(),
                connected: ready.is_connected(),
            },
            memory: MemoryCounts {
                users: Some(memory.len(Collection::Users) as u64),
                ..memory_counts(memory)
            },
        }
    }

    pub fn debug(state: &AppState) -> DebugResponse {
        let mongoose_states: BTreeMap<String, String> = ReadyState::ALL
            .iter()
            .map(|s| (s.as_u8().to_string(), s.label().to_string()))
            .collect();

        DebugResponse {
            mongoose_state: state.stores.ready_state().as_u8(),
            mongoose_states,
            memory_counts: memory_counts(state.memory()),
            connection_info: ConnectionInfo {
                configured: state.stores.has_primary(),
                database: state.mongo_config.as_ref().map(|c| c.database.clone()),
                host: state.mongo_config.as_ref().map(|c| c.redacted_uri()),
                last_error: state.stores.monitor().last_error(),
            },
        }
    }
}

fn memory_counts(memory: &MemoryStore) -> MemoryCounts {
    MemoryCounts {
        students: memory.len(Collection::Students) as u64,
        schools: memory.len(Collection::Schools) as u64,
        users: None,
    }
}
