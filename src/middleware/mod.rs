//! Request middleware and extractors.
//!
//! - [`auth`]: the bearer token gate and the per-request store extractor
//!
//! # Authentication Flow
//!
//! 1. `POST /api/v1/auth/login` answers one of two fixed tokens
//! 2. Clients send it back as `Authorization: Bearer <token>`
//! 3. [`auth::require_token`] compares it against both known values
//!
//! Login, logout and the operational endpoints sit outside the gate.

pub mod auth;
