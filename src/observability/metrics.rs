//! Metrics collection and exposition.
//!
//! # Metrics
//! - `config_facade_fetch_total` (counter): fetches by resource, outcome
//! - `config_facade_subscriptions_total` (counter): subscriptions by resource
//! - `config_facade_resource_loaded` (gauge): 1 once a resource holds a value
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of a resource fetch.
pub fn record_fetch(resource: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("config_facade_fetch_total", "resource" => resource, "outcome" => outcome)
        .increment(1);
}

/// Record a new subscription to a resource.
pub fn record_subscription(resource: &'static str) {
    metrics::counter!("config_facade_subscriptions_total", "resource" => resource).increment(1);
}

/// Record whether a resource currently holds a value.
pub fn record_loaded(resource: &'static str, loaded: bool) {
    metrics::gauge!("config_facade_resource_loaded", "resource" => resource)
        .set(if loaded { 1.0 } else { 0.0 });
}
