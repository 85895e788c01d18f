//! Request instrumentation filter.
//!
//! Mapped to `/*`, so it observes every request, including traffic that
//! later filters short-circuit. Records a request counter and a latency
//! histogram per completed exchange.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::container::{BoxFuture, Filter};
use crate::observability::metrics::record_request;

/// Instrumentation filter for all web traffic.
pub struct MetricsFilter {
    // Slot for the registry handle published at startup. The filter is
    // registered even when no recorder was installed; recording then goes
    // to the no-op facade and the slot stays empty.
    registry: Option<PrometheusHandle>,
}

impl MetricsFilter {
    pub fn new(registry: Option<PrometheusHandle>) -> Self {
        Self { registry }
    }

    /// The registry handle published into this filter, if any.
    pub fn registry(&self) -> Option<&PrometheusHandle> {
        self.registry.as_ref()
    }
}

impl Filter for MetricsFilter {
    fn handle(&self, request: Request, next: Next) -> BoxFuture<Response> {
        let start = Instant::now();
        let method = request.method().to_string();
        Box::pin(async move {
            let response = next.run(request).await;
            record_request(&method, response.status().as_u16(), start);
            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_registry_slot_holds_published_handle() {
        assert!(MetricsFilter::new(None).registry().is_none());

        let handle = PrometheusBuilder::new().build_recorder().handle();
        assert!(MetricsFilter::new(Some(handle)).registry().is_some());
    }
}
