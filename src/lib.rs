//! # School MIS API
//!
//! A REST API for running a school: schools, students, teachers, classes,
//! education levels and courses, behind a static bearer-token gate.
//!
//! ## Persistence
//!
//! Records live in MongoDB when it is reachable. When it is not, every
//! request is served from an in-process store instead, and responses that
//! care (login, stats) report which backend answered. The switch is made
//! per request by [`schoolmis_db::StoreSelector`]; a failed call opens a
//! circuit breaker and a later request probes the database again.
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── middleware/       # Token gate and the per-request store extractor
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Login and logout
//! │   ├── schools/      # School CRUD
//! │   ├── students/     # Student CRUD, filterable by school
//! │   ├── teachers/     # Teacher CRUD, filterable by school
//! │   ├── classes/      # Class CRUD, filterable by school and level
//! │   ├── levels/       # Level CRUD, filterable by school
//! │   ├── courses/      # Course CRUD, filterable by school and level
//! │   ├── stats/        # Record totals
//! │   └── system/       # Banner, health, debug
//! └── utils/            # Store error mapping
//! ```
//!
//! Each feature module has a `router.rs` and a `controller.rs`; modules with
//! logic beyond a repository call add a `service.rs`.
//!
//! ## Authentication
//!
//! `POST /api/v1/auth/login` trades a username and password for one of two
//! fixed tokens, depending on whether the account was found in MongoDB or is
//! the built-in fallback admin. Every other `/api/v1` route except logout
//! requires `Authorization: Bearer <token>`.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use schoolmis_config;
pub use schoolmis_core;
pub use schoolmis_db;
pub use schoolmis_models;
