//! Dispatch metrics.
//!
//! # Metrics
//! - `mock_requests_total` (counter): dispatched requests by method, status
//! - `mock_dispatch_failures_total` (counter): failed dispatches by error kind
//! - `mock_dispatch_duration_seconds` (histogram): time spent resolving
//!
//! No exporter is installed here; without a recorder these are no-ops.

use std::time::Instant;

/// Record one successful dispatch.
pub fn record_request(method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "mock_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("mock_dispatch_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one failed dispatch.
pub fn record_failure(kind: &'static str) {
    ::metrics::counter!("mock_dispatch_failures_total", "kind" => kind).increment(1);
}
