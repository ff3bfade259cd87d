//! # School MIS Config
//!
//! Configuration types for the School MIS API, loaded from environment
//! variables with an optional layered JSON file underneath.
//!
//! - [`server`]: bind address and runtime environment
//! - [`database`]: document store (MongoDB) connection settings
//! - [`auth`]: bearer token literals and the fallback admin account
//! - [`cors`]: CORS configuration
//! - [`logging`]: log directory and console format
//! - [`file`]: `config/default.json` + `config/<env>.json` lookup
//!
//! # Example
//!
//! ```ignore
//! use schoolmis_config::{AuthConfig, CorsConfig, MongoConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let mongo = MongoConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod database;
pub mod file;
pub mod logging;
pub mod server;

pub use auth::{AuthConfig, FallbackAccount};
pub use cors::CorsConfig;
pub use database::MongoConfig;
pub use file::FileConfig;
pub use logging::{LogConfig, LogFormat};
pub use server::ServerConfig;
