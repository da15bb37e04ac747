//! Lostfound: a lost-and-found item registry.
//!
//! Found items are persisted in a single SQLite table and can be listed,
//! created, claimed and deleted through two surfaces that share one set of
//! request handlers:
//!
//! - **HTTP**: JSON API served by axum
//! - **Console**: numbered interactive menu on stdin/stdout
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`model`]: Item records and create payloads
//! - [`storage`]: SQLite persistence layer
//! - [`service`]: Request handlers shared by both surfaces
//! - [`api`]: HTTP routes and error mapping
//! - [`menu`]: Interactive console loop
//! - [`server`]: HTTP listener lifecycle
//! - [`observability`]: Metrics and tracing setup

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions,    // storage::store::ItemStore is fine
    clippy::must_use_candidate,         // Not all functions need #[must_use]
    clippy::missing_errors_doc,         // Error docs can be verbose
    clippy::missing_panics_doc,         // Panic docs can be verbose
    clippy::needless_raw_string_hashes  // r#""# is fine for SQL
)]

pub mod api;
pub mod config;
pub mod menu;
pub mod model;
pub mod observability;
pub mod server;
pub mod service;
pub mod storage;
