//! # School MIS CLI
//!
//! Seeding and maintenance utilities for a School MIS database.
//!
//! Every operation takes a [`schoolmis_db::DocumentStore`], so the same code
//! runs against MongoDB from the binary and against a `MemoryStore` in tests.
//!
//! ## Usage
//!
//! ```ignore
//! use schoolmis_cli::seeder::{seed_all, SeedConfig};
//!
//! let report = seed_all(&store, &SeedConfig::new(3)).await?;
//! ```

pub mod seeder;
