//! Caching HTTP headers filter.
//!
//! Stamps long-lived cache headers on matched static responses so
//! browsers and CDNs keep hashed assets for the full TTL. Paths on the
//! no-cache list (unversioned or dynamically generated assets) get
//! `no-cache` instead.

use std::time::Duration;

use axum::extract::Request;
use axum::http::header::{HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::config::schema::CacheConfig;
use crate::container::{BoxFuture, Filter};

/// Sets cache-control and expiry headers on matched responses.
pub struct CachingHeadersFilter {
    ttl: Duration,
    no_cache_paths: Vec<String>,
}

impl CachingHeadersFilter {
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.ttl_secs),
            no_cache_paths: config.no_cache_paths.clone(),
        }
    }

    fn is_no_cache(&self, path: &str) -> bool {
        self.no_cache_paths.iter().any(|p| path.starts_with(p.as_str()))
    }
}

impl Filter for CachingHeadersFilter {
    fn handle(&self, request: Request, next: Next) -> BoxFuture<Response> {
        let no_cache = self.is_no_cache(request.uri().path());
        let ttl = self.ttl;
        Box::pin(async move {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            if no_cache {
                headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
                headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
                headers.insert(EXPIRES, HeaderValue::from_static("0"));
            } else {
                let cache_control = format!("max-age={}, public", ttl.as_secs());
                if let Ok(value) = HeaderValue::from_str(&cache_control) {
                    headers.insert(CACHE_CONTROL, value);
                }
                // TTLs too large for a representable date get no Expires
                // header; max-age alone applies then.
                let expires = i64::try_from(ttl.as_secs())
                    .ok()
                    .and_then(chrono::Duration::try_seconds)
                    .and_then(|delta| Utc::now().checked_add_signed(delta));
                if let Some(expires) = expires {
                    let expires = expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
                    if let Ok(value) = HeaderValue::from_str(&expires) {
                        headers.insert(EXPIRES, value);
                    }
                }
            }
            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(no_cache_paths: &[&str]) -> CachingHeadersFilter {
        CachingHeadersFilter::from_config(&CacheConfig {
            ttl_secs: 3600,
            no_cache_paths: no_cache_paths.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_no_cache_list_matches_by_prefix() {
        let f = filter(&["/assets/config"]);
        assert!(f.is_no_cache("/assets/config.json"));
        assert!(f.is_no_cache("/assets/config/env.js"));
        assert!(!f.is_no_cache("/assets/app.3f2a.js"));
    }

    #[test]
    fn test_empty_list_caches_everything() {
        let f = filter(&[]);
        assert!(!f.is_no_cache("/assets/anything"));
    }
}
