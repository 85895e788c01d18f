//! Web serving subsystem.
//!
//! # Data Flow
//! ```text
//! bootstrap
//!     → configurer.rs (one-shot filter/servlet registration)
//!     → server.rs (router assembly, listener, graceful shutdown)
//!
//! per request (owned by the runtime after startup):
//!     metrics filter → caching filter → static filter → routes/fallback
//! ```

pub mod configurer;
pub mod filter;
pub mod metrics_endpoint;
pub mod server;

pub use server::HttpServer;
