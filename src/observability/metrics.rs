//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, branch
//! - `gateway_request_duration_seconds` (histogram): latency by branch
//! - `gateway_errors_total` (counter): classified errors by kind
//! - `gateway_store_operations_total` (counter): store calls by op, outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder (tests, metrics disabled) every call is a no-op
//! - The Prometheus exporter serves its own listener
//! - The `method` label is bounded: extension methods are recorded as `other`

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Request branch label values.
pub const BRANCH_MANAGEMENT: &str = "management";
pub const BRANCH_PROXY: &str = "proxy";

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Fails if a global recorder is already installed or the listener cannot
/// be created.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Map a request method onto a fixed label set.
fn method_label(method: &str) -> &'static str {
    match method {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "PATCH" => "PATCH",
        "OPTIONS" => "OPTIONS",
        "CONNECT" => "CONNECT",
        "TRACE" => "TRACE",
        _ => "other",
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, branch: &'static str, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method_label(method),
        "status" => status.to_string(),
        "branch" => branch
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "branch" => branch)
        .record(start.elapsed().as_secs_f64());
}

/// Record a classified request error.
pub fn record_error(kind: &'static str) {
    counter!("gateway_errors_total", "kind" => kind).increment(1);
}

/// Record a route store call.
pub fn record_store_operation(op: &'static str, outcome: &'static str) {
    counter!("gateway_store_operations_total", "op" => op, "outcome" => outcome).increment(1);
}
