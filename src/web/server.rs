//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the container via the startup configurer
//! - Assemble the axum router and wire ambient middleware (tracing)
//! - Bind to a listener and serve with graceful shutdown

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::profiles::Profiles;
use crate::config::schema::ServerConfig;
use crate::container::{Container, ContainerError};
use crate::web::configurer;

/// HTTP server for the web frontend.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new server: runs the one-shot startup configuration and
    /// assembles the filter chain. Any registration failure aborts.
    pub fn new(
        config: ServerConfig,
        metrics_registry: Option<PrometheusHandle>,
    ) -> Result<Self, ContainerError> {
        let profiles = Profiles::from_tags(config.profiles.active.iter().cloned());

        let mut container = Container::new();
        configurer::customize(&mut container);
        configurer::on_startup(&mut container, &config, &profiles, metrics_registry)?;

        let router = container.into_router().layer(TraceLayer::new_for_http());
        Ok(Self { router })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
