//! Observability infrastructure.
//!
//! Provides:
//! - Structured tracing to stderr
//! - Prometheus counters for item operations

pub mod metrics;
pub mod tracing;
