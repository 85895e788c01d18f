//! Configuration validation.
//!
//! Serde handles syntactic checks; this module performs the semantic
//! ones and returns all violations, not just the first.

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single semantic violation found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn error(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a configuration, returning every violation found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(error(
            "listener.bind_address",
            format!("not a valid socket address: {:?}", config.listener.bind_address),
        ));
    }

    if config.profiles.active.is_empty() {
        errors.push(error("profiles.active", "at least one profile tag is required"));
    }
    for tag in &config.profiles.active {
        if tag.trim().is_empty() {
            errors.push(error("profiles.active", "profile tags must be non-empty"));
        }
    }

    if config.static_resources.index.is_empty() {
        errors.push(error("static_resources.index", "index document must be non-empty"));
    }

    if config.cache.ttl_secs == 0 {
        errors.push(error("cache.ttl_secs", "cache TTL must be greater than zero"));
    }
    for path in &config.cache.no_cache_paths {
        if !path.starts_with('/') {
            errors.push(error(
                "cache.no_cache_paths",
                format!("path must start with '/': {:?}", path),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.cache.ttl_secs = 0;
        config.cache.no_cache_paths = vec!["assets/raw".to_string()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "listener.bind_address"));
        assert!(errors.iter().any(|e| e.field == "cache.ttl_secs"));
        assert!(errors.iter().any(|e| e.field == "cache.no_cache_paths"));
    }
}
