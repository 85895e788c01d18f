//! Production web-frontend server.
//!
//! Serves a pre-built frontend behind an ordered HTTP filter chain:
//! metrics instrumentation on all traffic, a Prometheus snapshot
//! endpoint, and (under the production profile) caching headers and
//! static-resource serving for the compiled assets.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use webfront::config::loader::load_config;
use webfront::observability;
use webfront::{HttpServer, ServerConfig};

#[derive(Parser)]
#[command(name = "webfront")]
#[command(about = "Production web-frontend server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        profiles = ?config.profiles.active,
        metrics_enabled = config.observability.metrics_enabled,
        "configuration loaded"
    );

    let metrics_registry = if config.observability.metrics_enabled {
        match observability::metrics::install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!(error = %e, "failed to install metrics recorder");
                None
            }
        }
    } else {
        None
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config, metrics_registry)?;
    server.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
