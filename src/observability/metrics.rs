//! Metrics collection and exposition.
//!
//! # Metrics
//! - `puller_requests_total` (counter): handled requests by upstream status
//! - `puller_upstream_failures_total` (counter): transport failures by kind
//! - `puller_upstream_duration_seconds` (histogram): outbound call latency
//!
//! Recording is a no-op until a recorder is installed.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

pub const REQUESTS_TOTAL: &str = "puller_requests_total";
pub const UPSTREAM_FAILURES_TOTAL: &str = "puller_upstream_failures_total";
pub const UPSTREAM_DURATION_SECONDS: &str = "puller_upstream_duration_seconds";

/// Start the Prometheus exporter on `addr`. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record an upstream call that produced a complete response.
pub fn record_upstream(status: u16, start: Instant) {
    metrics::counter!(REQUESTS_TOTAL, "status" => status.to_string()).increment(1);
    metrics::histogram!(UPSTREAM_DURATION_SECONDS).record(start.elapsed().as_secs_f64());
}

/// Record an upstream call that failed before a complete response.
pub fn record_failure(kind: &'static str, start: Instant) {
    metrics::counter!(REQUESTS_TOTAL, "status" => "error").increment(1);
    metrics::counter!(UPSTREAM_FAILURES_TOTAL, "kind" => kind).increment(1);
    metrics::histogram!(UPSTREAM_DURATION_SECONDS).record(start.elapsed().as_secs_f64());
}
