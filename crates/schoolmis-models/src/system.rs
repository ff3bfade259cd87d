//! Bodies of the stats and operational endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub students: u64,
    pub schools: u64,
    /// `mongodb`, `memory`, or `memory-fallback` when counting failed
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongo_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MongoHealth {
    pub state: String,
    pub ready_state: u8,
    pub connected: bool,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct MemoryCounts {
    pub students: u64,
    pub schools: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub mongodb: MongoHealth,
    pub memory: MemoryCounts,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub configured: bool,
    pub database: Option<String>,
    /// Connection string with credentials removed
    pub host: Option<String>,
    pub last_error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    pub mongoose_state: u8,
    pub mongoose_states: BTreeMap<String, String>,
    pub memory_counts: MemoryCounts,
    pub connection_info: ConnectionInfo,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DemoCredentials {
    pub username: String,
    pub password: String,
}

/// Service banner served at `/`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub status: String,
    pub mongodb: String,
    pub endpoints: BTreeMap<String, String>,
    pub demo: DemoCredentials,
}
