//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the web-frontend server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Active deployment-profile tags (e.g. "dev", "production").
    pub profiles: ProfilesConfig,

    /// Pre-built static asset settings (production profile).
    pub static_resources: StaticResourcesConfig,

    /// Caching header settings for static assets.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Active deployment profiles.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfilesConfig {
    /// Profile tags; the "production" tag enables caching and
    /// static-resource filters.
    pub active: Vec<String>,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            active: vec!["dev".to_string()],
        }
    }
}

/// Static resource serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticResourcesConfig {
    /// Root directory holding the pre-built frontend.
    pub root: PathBuf,

    /// Index document served for "/".
    pub index: String,
}

impl Default for StaticResourcesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("dist"),
            index: "index.html".to_string(),
        }
    }
}

/// Caching header configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live for cached assets in seconds.
    pub ttl_secs: u64,

    /// Path prefixes that must never receive long-lived cache headers
    /// (unversioned or dynamically generated assets).
    pub no_cache_paths: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // One year, the conventional far-future TTL for hashed assets.
            ttl_secs: 31_536_000,
            no_cache_paths: Vec::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Install the Prometheus recorder and expose the snapshot endpoint.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}
