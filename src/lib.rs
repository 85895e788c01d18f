//! Production web-frontend server library.
//!
//! Serves a pre-built single-page frontend behind an ordered HTTP filter
//! chain. At startup the web configurer registers a metrics filter, a
//! metrics snapshot endpoint and (under the production profile) caching
//! and static-resource filters against URL patterns, then the container
//! assembles the chain into an axum router.

pub mod config;
pub mod container;
pub mod observability;
pub mod web;

pub use config::schema::ServerConfig;
pub use config::Profiles;
pub use container::Container;
pub use web::HttpServer;
