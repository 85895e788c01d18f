//! Servlet-style URL pattern matching.
//!
//! # Responsibilities
//! - Parse the three pattern shapes filters are mapped with: match-all
//!   (`/*`), prefix wildcard (`/assets/*`) and exact (`/index.html`)
//! - Match request paths with case-sensitive semantics
//!
//! # Design Decisions
//! - A prefix pattern `/assets/*` matches both `/assets` and `/assets/x`
//! - No regex to guarantee O(n) matching

use std::fmt;

/// A URL pattern a filter or servlet is mapped against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPattern {
    /// Matches every request path (`/*`).
    All,
    /// Matches a path prefix; the stored prefix carries no trailing `*`
    /// or `/` (`/assets/*` is stored as `/assets`).
    Prefix(String),
    /// Matches one path exactly.
    Exact(String),
}

/// Error for a malformed URL pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pattern: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URL pattern {:?}: must start with '/'", self.pattern)
    }
}

impl std::error::Error for PatternError {}

impl UrlPattern {
    /// Parse a servlet-style pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError {
                pattern: pattern.to_string(),
            });
        }
        if pattern == "/*" {
            return Ok(UrlPattern::All);
        }
        if let Some(prefix) = pattern.strip_suffix("/*") {
            return Ok(UrlPattern::Prefix(prefix.to_string()));
        }
        Ok(UrlPattern::Exact(pattern.to_string()))
    }

    /// Returns true if the request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            UrlPattern::All => true,
            UrlPattern::Prefix(prefix) => {
                path == prefix || path.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with('/'))
            }
            UrlPattern::Exact(exact) => path == exact,
        }
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlPattern::All => write!(f, "/*"),
            UrlPattern::Prefix(prefix) => write!(f, "{}/*", prefix),
            UrlPattern::Exact(exact) => write!(f, "{}", exact),
        }
    }
}
