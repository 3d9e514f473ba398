//! Metrics collection and export for Parlor.
//!
//! Uses the `metrics` crate for instrumentation and exports
//! to Prometheus format.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

/// Metric names.
pub mod names {
    pub const REGISTRATIONS_TOTAL: &str = "parlor_registrations_total";
    pub const PARTICIPANTS_ACTIVE: &str = "parlor_participants_active";
    pub const MESSAGES_TOTAL: &str = "parlor_messages_total";
    pub const EVICTIONS_TOTAL: &str = "parlor_evictions_total";
    pub const REQUEST_LATENCY_SECONDS: &str = "parlor_request_latency_seconds";
    pub const ERRORS_TOTAL: &str = "parlor_errors_total";
}

/// Initialize the metrics system.
pub fn init_metrics() {
    // Describe metrics
    metrics::describe_counter!(
        names::REGISTRATIONS_TOTAL,
        "Total number of participant registrations since server start"
    );
    metrics::describe_gauge!(
        names::PARTICIPANTS_ACTIVE,
        "Current number of registered participants"
    );
    metrics::describe_counter!(names::MESSAGES_TOTAL, "Total number of messages posted");
    metrics::describe_counter!(
        names::EVICTIONS_TOTAL,
        "Total number of participants evicted by the sweep"
    );
    metrics::describe_histogram!(
        names::REQUEST_LATENCY_SECONDS,
        "Request handling latency in seconds"
    );
    metrics::describe_counter!(names::ERRORS_TOTAL, "Total number of errors");

    info!("Metrics initialized");
}

/// Start the Prometheus metrics server.
///
/// # Errors
///
/// Returns an error if the server cannot be started.
pub fn start_metrics_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    info!("Metrics server listening on {}", addr);
    Ok(())
}

/// Record a successful registration.
pub fn record_registration() {
    counter!(names::REGISTRATIONS_TOTAL).increment(1);
    gauge!(names::PARTICIPANTS_ACTIVE).increment(1.0);
}

/// Record a posted message.
pub fn record_message(kind: &str) {
    counter!(names::MESSAGES_TOTAL, "kind" => kind.to_string()).increment(1);
}

/// Record a swept participant.
pub fn record_eviction() {
    counter!(names::EVICTIONS_TOTAL).increment(1);
    gauge!(names::PARTICIPANTS_ACTIVE).decrement(1.0);
}

/// Record request latency.
pub fn record_latency(seconds: f64) {
    histogram!(names::REQUEST_LATENCY_SECONDS).record(seconds);
}

/// Record an error.
pub fn record_error(error_type: &str) {
    counter!(names::ERRORS_TOTAL, "type" => error_type.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_does_not_panic_without_exporter() {
        record_registration();
        record_message("broadcast");
        record_eviction();
        record_latency(0.001);
        record_error("validation");
    }
}
