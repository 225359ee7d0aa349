//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by outcome
//!   (matched, redirect, not_found)
//! - `router_resolution_duration_seconds` (histogram): resolution latency
//!
//! # Design Decisions
//! - Low-overhead updates (atomic operations in the recorder)
//! - Outcome label only; paths are unbounded and never become labels

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on the given address.
///
/// Failure to bind is logged, not fatal: the router keeps serving
/// without a scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one resolution attempt.
pub fn record_resolution(outcome: &'static str, start: Instant) {
    metrics::counter!("router_resolutions_total", "outcome" => outcome).increment(1);
    metrics::histogram!("router_resolution_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
