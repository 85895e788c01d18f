//! Metrics recording and the Prometheus recorder.
//!
//! # Metrics
//! - `webfront_requests_total` (counter): requests by method, status
//! - `webfront_request_duration_seconds` (histogram): latency by method

use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder and return the snapshot handle.
///
/// The handle is what the metrics endpoint renders; recording itself goes
/// through the global facade and keeps working if installation is skipped.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let latency = start.elapsed();

    counter!(
        "webfront_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "webfront_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(latency.as_secs_f64());
}
