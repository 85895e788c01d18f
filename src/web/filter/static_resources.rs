//! Static resources production filter.
//!
//! In the production profile the frontend is pre-built into a directory
//! of hashed assets; this filter serves those files directly and never
//! falls through to application routing for its mapped patterns. The
//! content type comes from the container's MIME table, so the startup
//! overrides apply to every static response.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{HeaderValue, CONTENT_TYPE};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::schema::StaticResourcesConfig;
use crate::container::mime::MimeMappings;
use crate::container::{BoxFuture, Filter};

/// Serves pre-built frontend assets from disk.
pub struct StaticResourcesFilter {
    root: PathBuf,
    index: String,
    mime: Arc<MimeMappings>,
}

impl StaticResourcesFilter {
    pub fn new(config: &StaticResourcesConfig, mime: Arc<MimeMappings>) -> Self {
        Self {
            root: config.root.clone(),
            index: config.index.clone(),
            mime,
        }
    }

    /// Resolve a request path to a file under the root, rejecting
    /// traversal outside it. `/` maps to the index document.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = match request_path {
            "/" => self.index.as_str(),
            other => other.trim_start_matches('/'),
        };
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl Filter for StaticResourcesFilter {
    fn handle(&self, request: Request, _next: Next) -> BoxFuture<Response> {
        let method = request.method().clone();
        let request_path = request.uri().path().to_string();
        let resolved = self.resolve(&request_path);
        let mime = self.mime.clone();
        Box::pin(async move {
            if method != Method::GET && method != Method::HEAD {
                return StatusCode::METHOD_NOT_ALLOWED.into_response();
            }
            let Some(file_path) = resolved else {
                tracing::warn!(path = %request_path, "rejected traversal in static path");
                return StatusCode::NOT_FOUND.into_response();
            };
            match tokio::fs::read(&file_path).await {
                Ok(contents) => {
                    let content_type = file_path
                        .to_str()
                        .and_then(|p| mime.for_path(p))
                        .unwrap_or("application/octet-stream");
                    let mut response = if method == Method::HEAD {
                        Body::empty().into_response()
                    } else {
                        Body::from(contents).into_response()
                    };
                    if let Ok(value) = HeaderValue::from_str(content_type) {
                        response.headers_mut().insert(CONTENT_TYPE, value);
                    }
                    response
                }
                Err(e)
                    if e.kind() == std::io::ErrorKind::NotFound
                        || e.kind() == std::io::ErrorKind::IsADirectory =>
                {
                    StatusCode::NOT_FOUND.into_response()
                }
                Err(e) => {
                    tracing::warn!(path = %file_path.display(), error = %e, "failed to read static file");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        })
    }
}
