//! Metrics collection and exposition.
//!
//! # Metrics
//! - `facade_requests_total` (counter): inbound requests by method, route, status
//! - `facade_request_duration_seconds` (histogram): inbound latency by method, route
//! - `facade_upstream_calls_total` (counter): upstream calls by operation, outcome
//! - `facade_upstream_retries_total` (counter): rate-limit retries by operation
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one inbound request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    metrics::counter!(
        "facade_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "facade_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the final outcome of an upstream call.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "facade_upstream_calls_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a retry after a rate-limited attempt.
pub fn record_retry(operation: &'static str) {
    metrics::counter!("facade_upstream_retries_total", "operation" => operation).increment(1);
}
