//! # School MIS Models
//!
//! Records and request DTOs for every resource the API serves.
//!
//! Each resource module holds three kinds of type:
//!
//! - the stored record (`School`, `Student`, ...), which implements
//!   [`schoolmis_db::Resource`] so a `Repository` can load it
//! - a `Create*Dto` carrying the create rules
//! - an `Update*Dto` with the same rules and every field optional
//!
//! DTOs reject unknown fields and implement [`schoolmis_core::Normalize`],
//! which trims and case-folds fields before validation runs.

pub mod auth;
pub mod classes;
pub mod common;
pub mod courses;
pub mod levels;
pub mod rules;
pub mod schools;
pub mod students;
pub mod system;
pub mod teachers;
pub mod users;
