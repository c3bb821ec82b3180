//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, segment
//! - `proxy_request_duration_seconds` (histogram): latency distribution
//! - `youtube_lookups_total` (counter): upstream lookups by outcome
//!
//! Recording is a no-op until a recorder is installed, so handlers and
//! tests never need to know whether the exporter is running.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Outcome label for an upstream lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found,
    NotFound,
    Failed,
}

impl LookupOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupOutcome::Found => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::Failed => "failed",
        }
    }
}

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one served request.
pub fn record_request(method: &str, status: u16, segment: &str, start: Instant) {
    let (method, status, segment) = (method.to_string(), status.to_string(), segment.to_string());
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.clone(),
        "status" => status.clone(),
        "segment" => segment.clone()
    )
    .increment(1);
    metrics::histogram!(
        "proxy_request_duration_seconds",
        "method" => method,
        "status" => status,
        "segment" => segment
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream lookup.
pub fn record_lookup(outcome: LookupOutcome) {
    metrics::counter!("youtube_lookups_total", "outcome" => outcome.as_str()).increment(1);
}
