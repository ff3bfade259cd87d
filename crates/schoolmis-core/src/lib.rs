//! # School MIS Core
//!
//! Core types, errors, and utilities shared by every School MIS crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`normalize`]: Request body normalisation (trimming, case folding, defaults)
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use schoolmis_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("School not found"));
//! ```

pub mod errors;
pub mod normalize;
pub mod serde;

pub use errors::{AppError, FieldError};
pub use normalize::Normalize;
