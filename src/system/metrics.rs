//! Metrics collection and monitoring for the Shareloop marketplace
//!
//! Prometheus counters for the store's create/search operations,
//! registered once and served by the API at `GET /metrics`.

use crate::core::error::Result;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, IntCounter};

/// Operation counters for tracking marketplace activity
pub struct OperationMetrics {
    /// Total number of users registered
    pub users_created: IntCounter,
    /// Total number of items listed
    pub items_created: IntCounter,
    /// Total number of requests posted
    pub requests_created: IntCounter,
    /// Total number of transactions recorded
    pub transactions_created: IntCounter,
    /// Total number of item searches served
    pub item_searches: IntCounter,
}

impl OperationMetrics {
    /// Create a new OperationMetrics instance with registered Prometheus counters
    fn new() -> Result<Self> {
        Ok(Self {
            users_created: register_int_counter!(
                "sl_users_created_total",
                "Total number of users registered"
            )?,
            items_created: register_int_counter!(
                "sl_items_created_total",
                "Total number of items listed"
            )?,
            requests_created: register_int_counter!(
                "sl_requests_created_total",
                "Total number of requests posted"
            )?,
            transactions_created: register_int_counter!(
                "sl_transactions_created_total",
                "Total number of transactions recorded"
            )?,
            item_searches: register_int_counter!(
                "sl_item_searches_total",
                "Total number of item searches served"
            )?,
        })
    }
}

/// Centralized metrics collection for all system components
pub struct Metrics {
    /// Marketplace operation metrics
    pub operations: OperationMetrics,
}

impl Metrics {
    /// Create new metrics instance
    fn new() -> Result<Self> {
        Ok(Self {
            operations: OperationMetrics::new()?,
        })
    }

    /// Get the global metrics instance
    pub fn global() -> &'static Metrics {
        static INSTANCE: Lazy<Metrics> =
            Lazy::new(|| Metrics::new().expect("Failed to initialize metrics"));
        &INSTANCE
    }
}

/// Initialize the metrics registry by creating the global metrics instance
///
/// Called once during application startup so every counter is registered
/// before the first scrape.
pub fn init_registry() {
    let _ = Metrics::global();
}

/// Collect and return all metrics as a Prometheus-formatted string
pub fn collect_metrics() -> String {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode_to_string(&metric_families).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_register_once_and_accumulate() {
        // Goal: the global instance is shared and scrapes include our names
        init_registry();
        let before = Metrics::global().operations.items_created.get();
        Metrics::global().operations.items_created.inc();
        assert_eq!(Metrics::global().operations.items_created.get(), before + 1);

        let exposition = collect_metrics();
        assert!(exposition.contains("sl_items_created_total"));
    }
}
