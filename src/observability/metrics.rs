//! Prometheus metrics.
//!
//! Key metrics:
//! - lostfound_requests_total: Counter of item operations by operation and outcome
//! - lostfound_items_created_total: Counter of items registered

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

/// Global metrics instance.
static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Lostfound metrics registry.
#[derive(Debug)]
pub struct Metrics {
    registry: Registry,
    /// Item operations, labelled by `operation` and `outcome`.
    pub requests_total: IntCounterVec,
    /// Items registered since startup.
    pub items_created_total: IntCounter,
}

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("lostfound_requests_total", "Item operations by outcome"),
            &["operation", "outcome"],
        )?;
        let items_created_total = IntCounter::new(
            "lostfound_items_created_total",
            "Number of items registered",
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(items_created_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            items_created_total,
        })
    }
}

/// Get the global metrics instance, creating it on first use.
pub fn metrics() -> &'static Metrics {
    METRICS.get_or_init(|| Metrics::new().expect("metric names are static and unique"))
}

/// Registry to expose on the scrape endpoint.
pub fn prometheus_registry() -> &'static Registry {
    &metrics().registry
}

/// Record the outcome of one item operation.
pub fn record_request(operation: &str, outcome: &str) {
    metrics()
        .requests_total
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Record a newly registered item.
pub fn record_item_created() {
    metrics().items_created_total.inc();
}
