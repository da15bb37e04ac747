//! SQLite storage layer for lostfound.
//!
//! Provides:
//! - Schema initialization on first run
//! - Pooled connections, one checked out per operation
//! - Item CRUD statements

pub mod schema;
pub mod store;

pub use store::{ItemStore, StoreError};
