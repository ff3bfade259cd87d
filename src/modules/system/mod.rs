//! Unauthenticated operational endpoints: the banner, health and debug.

pub mod controller;
pub mod router;
pub mod service;

pub use router::init_system_router;
