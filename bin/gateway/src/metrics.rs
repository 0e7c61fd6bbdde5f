//! Prometheus metrics for the gateway.
//!
//! All metrics are aggregated in the [`Metrics`] struct for easy tracking and management.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Aggregated metrics for the gateway.
///
/// This struct provides a centralized interface for recording all gateway metrics.
/// Metrics are registered with the global metrics registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    /// Register metric descriptions with the global registry.
    fn register_descriptions() {
        describe_counter!(
            "gateway_resolutions_total",
            "Total number of resolution requests handled"
        );
        describe_counter!(
            "gateway_resolutions_success_total",
            "Total successful resolutions by function signature"
        );
        describe_counter!(
            "gateway_resolutions_failure_total",
            "Total failed resolutions by function signature"
        );
        describe_counter!(
            "gateway_no_match_total",
            "Total requests for signatures this gateway does not resolve"
        );
        describe_histogram!(
            "gateway_resolution_duration_seconds",
            "Duration of each resolution in seconds"
        );
    }

    /// Record a completed resolution.
    pub fn record_resolution(&self, signature: &str, success: bool, duration: Duration) {
        counter!("gateway_resolutions_total").increment(1);
        histogram!("gateway_resolution_duration_seconds").record(duration.as_secs_f64());

        if success {
            counter!("gateway_resolutions_success_total", "signature" => signature.to_string())
                .increment(1);
        } else {
            counter!("gateway_resolutions_failure_total", "signature" => signature.to_string())
                .increment(1);
        }
    }

    /// Record a request for an unsupported signature.
    pub fn record_no_match(&self, signature: &str) {
        counter!("gateway_no_match_total", "signature" => signature.to_string()).increment(1);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
