//! Metrics collection and exposition.
//!
//! # Metrics
//! - `blockhub_requests_total` (counter): inbound requests by method, status
//! - `blockhub_request_duration_seconds` (histogram): inbound latency
//! - `blockhub_upstream_calls_total` (counter): outbound calls by kind, outcome
//! - `blockhub_upstream_duration_seconds` (histogram): outbound latency by kind
//!
//! Recording is always safe; without an installed exporter the macros are no-ops.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one inbound request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "blockhub_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("blockhub_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one outbound call to the explorer.
pub fn record_upstream(kind: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "blockhub_upstream_calls_total",
        "kind" => kind,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("blockhub_upstream_duration_seconds", "kind" => kind)
        .record(start.elapsed().as_secs_f64());
}
