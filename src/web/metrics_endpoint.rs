//! Metrics snapshot endpoint.
//!
//! Serves the Prometheus registry snapshot in text exposition format.
//! The handle is published at startup; when none was installed the
//! endpoint answers 503 rather than an empty snapshot.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, MethodRouter};
use metrics_exporter_prometheus::PrometheusHandle;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Build the snapshot-serving handler around the published registry slot.
pub fn metrics_servlet(registry: Option<PrometheusHandle>) -> MethodRouter {
    get(move || {
        let registry = registry.clone();
        async move {
            match registry {
                Some(handle) => (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
                    handle.render(),
                )
                    .into_response(),
                None => {
                    (StatusCode::SERVICE_UNAVAILABLE, "metrics registry unavailable")
                        .into_response()
                }
            }
        }
    })
}
