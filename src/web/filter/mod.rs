//! Filter implementations registered by the web configurer.

pub mod caching;
pub mod metrics;
pub mod static_resources;

pub use caching::CachingHeadersFilter;
pub use metrics::MetricsFilter;
pub use static_resources::StaticResourcesFilter;
