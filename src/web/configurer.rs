//! Startup configuration of the web container.
//!
//! Registers the filter chain and the metrics endpoint once at boot,
//! mirroring the order the chain must execute in: instrumentation first,
//! so static and cached traffic is still counted, then the
//! production-only caching and static-resource filters.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::profiles::{Profiles, PROFILE_PRODUCTION};
use crate::config::schema::ServerConfig;
use crate::container::mime::MimeMappings;
use crate::container::registration::{DispatcherSet, DispatcherType};
use crate::container::{Container, ContainerError};
use crate::web::filter::{CachingHeadersFilter, MetricsFilter, StaticResourcesFilter};
use crate::web::metrics_endpoint::metrics_servlet;

pub const METRICS_FILTER_NAME: &str = "webappMetricsFilter";
pub const METRICS_SERVLET_NAME: &str = "metricsServlet";
pub const CACHING_FILTER_NAME: &str = "cachingHttpHeadersFilter";
pub const STATIC_FILTER_NAME: &str = "staticResourcesProductionFilter";

/// Register filters and servlets into the container.
///
/// Runs exactly once at startup, after [`customize`]. The metrics filter
/// and servlet are always registered; the caching and static-resource
/// filters only under the production profile. The metrics registry slot
/// may be empty; the filter and servlet are registered regardless.
pub fn on_startup(
    container: &mut Container,
    config: &ServerConfig,
    profiles: &Profiles,
    metrics_registry: Option<PrometheusHandle>,
) -> Result<(), ContainerError> {
    tracing::info!(profiles = %profiles, "web application configuration");
    let disps = DispatcherSet::of(&[
        DispatcherType::Request,
        DispatcherType::Forward,
        DispatcherType::Async,
    ]);

    init_metrics(container, disps, metrics_registry)?;
    if profiles.accepts(PROFILE_PRODUCTION) {
        init_caching_http_headers_filter(container, disps, config)?;
        init_static_resources_production_filter(container, disps, config)?;
    }

    tracing::info!("web application fully configured");
    Ok(())
}

/// Override MIME mappings on the container.
///
/// `.html` and `.json` are served as `text/html;charset=utf-8` to work
/// around intermediary quirks, not as a content-negotiation policy.
/// Unconditional and idempotent; the bootstrap runs this before
/// [`on_startup`] so the static filter sees the final table.
pub fn customize(container: &mut Container) {
    let mut mappings = MimeMappings::default();
    // IE renders downloads instead of pages without the charset suffix.
    mappings.add("html", "text/html;charset=utf-8");
    // Some front proxies rewrite application/json responses for static
    // .json files; serving them as html avoids the mangling.
    mappings.add("json", "text/html;charset=utf-8");
    container.set_mime_mappings(mappings);
}

/// Initializes metrics: publishes the registry handle and registers the
/// instrumentation filter and the snapshot servlet.
fn init_metrics(
    container: &mut Container,
    disps: DispatcherSet,
    metrics_registry: Option<PrometheusHandle>,
) -> Result<(), ContainerError> {
    tracing::debug!("registering metrics filter");
    container
        .add_filter(METRICS_FILTER_NAME, MetricsFilter::new(metrics_registry.clone()))?
        .add_mapping_for_url_patterns(disps, &["/*"])?
        .set_async_supported(true);

    tracing::debug!("registering metrics servlet");
    container
        .add_servlet(METRICS_SERVLET_NAME, metrics_servlet(metrics_registry))?
        .add_mapping("/metrics/metrics/*")?
        .set_async_supported(true)
        .set_load_on_startup(2);

    Ok(())
}

/// Initializes the caching HTTP headers filter.
fn init_caching_http_headers_filter(
    container: &mut Container,
    disps: DispatcherSet,
    config: &ServerConfig,
) -> Result<(), ContainerError> {
    tracing::debug!("registering caching HTTP headers filter");
    container
        .add_filter(
            CACHING_FILTER_NAME,
            CachingHeadersFilter::from_config(&config.cache),
        )?
        .add_mapping_for_url_patterns(disps, &["/assets/*", "/scripts/*", "/maps/*"])?
        .set_async_supported(true);
    Ok(())
}

/// Initializes the static resources production filter.
fn init_static_resources_production_filter(
    container: &mut Container,
    disps: DispatcherSet,
    config: &ServerConfig,
) -> Result<(), ContainerError> {
    tracing::debug!("registering static resources production filter");
    let mime = Arc::new(container.mime_mappings().clone());
    container
        .add_filter(
            STATIC_FILTER_NAME,
            StaticResourcesFilter::new(&config.static_resources, mime),
        )?
        .add_mapping_for_url_patterns(disps, &["/", "/index.html", "/assets/*", "/scripts/*"])?
        .set_async_supported(true);
    Ok(())
}
