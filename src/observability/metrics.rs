//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): gateway requests by endpoint, status
//! - `gateway_upstream_attempts_total` (counter): upstream attempts by route, outcome
//! - `gateway_breaker_transitions_total` (counter): breaker transitions by route, state
//! - `gateway_cache_lookups_total` (counter): composite cache lookups by result
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed, so the library
//!   (and its tests) never needs a recorder
//! - Labels stay low-cardinality: route labels, not pet ids

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(err) => tracing::error!(error = %err, "failed to install metrics exporter"),
    }
}

/// One gateway request served.
pub fn record_request(endpoint: &'static str, status: u16) {
    counter!(
        "gateway_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}

/// One attempt against an upstream route.
pub fn record_upstream_attempt(route: &'static str, outcome: &'static str) {
    counter!(
        "gateway_upstream_attempts_total",
        "route" => route,
        "outcome" => outcome
    )
    .increment(1);
}

/// A circuit breaker changed state.
pub fn record_breaker_transition(route: &'static str, state: &'static str) {
    counter!(
        "gateway_breaker_transitions_total",
        "route" => route,
        "state" => state
    )
    .increment(1);
}

/// One composite cache lookup.
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("gateway_cache_lookups_total", "result" => result).increment(1);
}
