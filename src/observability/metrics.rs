//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): requests by endpoint, status
//! - `bridge_publishes_total` (counter): publishes by outcome
//! - `bridge_publish_duration_seconds` (histogram): time spent in publish
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled HTTP request.
pub fn record_request(endpoint: &'static str, status: u16) {
    counter!(
        "bridge_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record one publish attempt.
pub fn record_publish(ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("bridge_publishes_total", "outcome" => outcome).increment(1);
    histogram!("bridge_publish_duration_seconds").record(start.elapsed().as_secs_f64());
}
