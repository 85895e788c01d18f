//! Servlet-container analogue: ordered filter and servlet registrations.
//!
//! # Data Flow
//! ```text
//! bootstrap
//!     → configurer registers filters/servlets + MIME overrides
//!     → Container records them in registration order
//!     → into_router() assembles the axum filter chain
//!     → runtime serves requests through the chain
//! ```
//!
//! # Design Decisions
//! - Filters execute in registration order (first registered runs first)
//! - A filter only sees requests matching one of its URL patterns;
//!   everything else passes straight to the next chain element
//! - Registration is write-once; duplicate names abort startup

pub mod mime;
pub mod pattern;
pub mod registration;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;
use axum::Router;

use self::mime::MimeMappings;
use self::pattern::{PatternError, UrlPattern};
use self::registration::{FilterRegistration, ServletRegistration};

/// Boxed future returned by [`Filter::handle`].
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A request/response interceptor in the filter chain.
///
/// Given a request and the continuation of the chain, a filter may
/// observe the exchange, transform the response, or short-circuit by
/// never invoking `next`.
pub trait Filter: Send + Sync + 'static {
    fn handle(&self, request: Request, next: Next) -> BoxFuture<Response>;
}

/// Error raised while registering into the container.
#[derive(Debug)]
pub enum ContainerError {
    /// A filter with the same name is already registered.
    DuplicateFilter(String),
    /// A servlet with the same name is already registered.
    DuplicateServlet(String),
    /// A mapping used a malformed URL pattern.
    Pattern(PatternError),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::DuplicateFilter(name) => {
                write!(f, "filter {:?} is already registered", name)
            }
            ContainerError::DuplicateServlet(name) => {
                write!(f, "servlet {:?} is already registered", name)
            }
            ContainerError::Pattern(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ContainerError {}

impl From<PatternError> for ContainerError {
    fn from(e: PatternError) -> Self {
        ContainerError::Pattern(e)
    }
}

/// Registration surface the startup configurer writes into.
///
/// Collects filter and servlet registrations plus the MIME table, then
/// assembles them into an axum [`Router`]. Built exactly once, before
/// the first request is served.
#[derive(Default)]
pub struct Container {
    filters: Vec<FilterRegistration>,
    servlets: Vec<ServletRegistration>,
    mime: MimeMappings,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter under a unique name. Mappings are added on the
    /// returned registration.
    pub fn add_filter<F: Filter>(
        &mut self,
        name: &str,
        filter: F,
    ) -> Result<&mut FilterRegistration, ContainerError> {
        if self.filters.iter().any(|r| r.name() == name) {
            return Err(ContainerError::DuplicateFilter(name.to_string()));
        }
        self.filters
            .push(FilterRegistration::new(name.to_string(), Arc::new(filter)));
        Ok(self.filters.last_mut().expect("registration just pushed"))
    }

    /// Register a servlet (route handler) under a unique name.
    pub fn add_servlet(
        &mut self,
        name: &str,
        handler: MethodRouter,
    ) -> Result<&mut ServletRegistration, ContainerError> {
        if self.servlets.iter().any(|r| r.name() == name) {
            return Err(ContainerError::DuplicateServlet(name.to_string()));
        }
        self.servlets
            .push(ServletRegistration::new(name.to_string(), handler));
        Ok(self.servlets.last_mut().expect("registration just pushed"))
    }

    /// Filter registrations in registration order.
    pub fn filters(&self) -> &[FilterRegistration] {
        &self.filters
    }

    /// Servlet registrations in registration order.
    pub fn servlets(&self) -> &[ServletRegistration] {
        &self.servlets
    }

    /// The MIME table consulted by static responses.
    pub fn mime_mappings(&self) -> &MimeMappings {
        &self.mime
    }

    /// Replace the MIME table.
    pub fn set_mime_mappings(&mut self, mappings: MimeMappings) {
        self.mime = mappings;
    }

    /// Assemble the registered chain into an axum router.
    ///
    /// Servlets become routes; filters wrap the router gated by their URL
    /// patterns. Layers are applied in reverse registration order so the
    /// first-registered filter runs outermost and observes all traffic,
    /// including requests later filters short-circuit.
    pub fn into_router(self) -> Router {
        let mut eager: Vec<(&str, i32)> = self
            .servlets
            .iter()
            .filter_map(|s| s.load_on_startup().map(|p| (s.name(), p)))
            .collect();
        eager.sort_by_key(|&(_, priority)| priority);
        for (name, priority) in eager {
            tracing::debug!(servlet = name, priority, "eager servlet initialization");
        }

        let mut router = Router::new();
        for servlet in &self.servlets {
            for pattern in servlet.patterns() {
                for path in axum_paths(pattern) {
                    router = router.route(&path, servlet.handler());
                }
            }
            tracing::debug!(
                servlet = servlet.name(),
                patterns = ?servlet.patterns(),
                async_supported = servlet.is_async_supported(),
                "servlet mounted"
            );
        }
        router = router.fallback(not_found);

        let filter_count = self.filters.len();
        let servlet_count = self.servlets.len();
        for reg in self.filters.iter().rev() {
            tracing::debug!(
                filter = reg.name(),
                patterns = ?reg.patterns(),
                dispatchers = ?reg.dispatchers(),
                async_supported = reg.is_async_supported(),
                "filter mounted"
            );
            let filter = reg.filter();
            let patterns: Arc<[UrlPattern]> = reg.patterns().to_vec().into();
            router = router.layer(middleware::from_fn(
                move |request: Request, next: Next| {
                    let filter = filter.clone();
                    let patterns = patterns.clone();
                    async move {
                        if patterns.iter().any(|p| p.matches(request.uri().path())) {
                            filter.handle(request, next).await
                        } else {
                            next.run(request).await
                        }
                    }
                },
            ));
        }

        tracing::info!(
            filters = filter_count,
            servlets = servlet_count,
            "filter chain assembled"
        );
        router
    }
}

/// Translate a servlet-style pattern into axum route paths.
fn axum_paths(pattern: &UrlPattern) -> Vec<String> {
    match pattern {
        UrlPattern::All => vec!["/".to_string(), "/{*rest}".to_string()],
        UrlPattern::Prefix(prefix) => {
            vec![prefix.clone(), format!("{}/{{*rest}}", prefix)]
        }
        UrlPattern::Exact(exact) => vec![exact.clone()],
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::registration::{DispatcherSet, DispatcherType};

    struct NoopFilter;

    impl Filter for NoopFilter {
        fn handle(&self, request: Request, next: Next) -> BoxFuture<Response> {
            Box::pin(async move { next.run(request).await })
        }
    }

    #[test]
    fn test_duplicate_filter_name_is_rejected() {
        let mut container = Container::new();
        container.add_filter("f", NoopFilter).unwrap();
        let err = container.add_filter("f", NoopFilter).unwrap_err();
        assert!(matches!(err, ContainerError::DuplicateFilter(_)));
    }

    #[test]
    fn test_duplicate_servlet_name_is_rejected() {
        let mut container = Container::new();
        let handler = axum::routing::get(|| async { "ok" });
        container.add_servlet("s", handler.clone()).unwrap();
        let err = container.add_servlet("s", handler).unwrap_err();
        assert!(matches!(err, ContainerError::DuplicateServlet(_)));
    }

    #[test]
    fn test_registrations_keep_order() {
        let mut container = Container::new();
        container
            .add_filter("first", NoopFilter)
            .unwrap()
            .add_mapping_for_url_patterns(
                DispatcherSet::of(&[DispatcherType::Request]),
                &["/*"],
            )
            .unwrap();
        container.add_filter("second", NoopFilter).unwrap();
        let names: Vec<_> = container.filters().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_axum_paths_for_patterns() {
        assert_eq!(
            axum_paths(&UrlPattern::parse("/metrics/metrics/*").unwrap()),
            ["/metrics/metrics", "/metrics/metrics/{*rest}"]
        );
        assert_eq!(axum_paths(&UrlPattern::parse("/index.html").unwrap()), ["/index.html"]);
        assert_eq!(axum_paths(&UrlPattern::parse("/*").unwrap()), ["/", "/{*rest}"]);
    }
}
