//! Deployment profile tags.
//!
//! A profile is a named deployment-environment tag. The only tag the
//! server branches on is "production", which enables the caching and
//! static-resource filters.

use std::collections::BTreeSet;
use std::fmt;

/// Profile tag enabling production-only filters.
pub const PROFILE_PRODUCTION: &str = "production";

/// Profile tag for local development.
pub const PROFILE_DEV: &str = "dev";

/// Immutable set of active deployment-profile tags, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profiles {
    tags: BTreeSet<String>,
}

impl Profiles {
    /// Build the profile set from configured tags.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the given tag is active.
    pub fn accepts(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterate over active tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl fmt::Display for Profiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.tags {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", tag)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_active_tag() {
        let profiles = Profiles::from_tags(["dev", "metrics"]);
        assert!(profiles.accepts(PROFILE_DEV));
        assert!(profiles.accepts("metrics"));
        assert!(!profiles.accepts(PROFILE_PRODUCTION));
    }

    #[test]
    fn test_display_is_sorted_and_comma_separated() {
        let profiles = Profiles::from_tags(["production", "dev"]);
        assert_eq!(profiles.to_string(), "dev,production");
    }
}
