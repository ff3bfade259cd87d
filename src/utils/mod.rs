//! Shared helpers for the HTTP layer.
//!
//! - [`errors`]: persistence error to HTTP error mapping

pub mod errors;

pub use errors::store_error;
