//! Registration records for filters and servlets.
//!
//! Records are write-once at startup and owned by the container for the
//! process lifetime. The dispatch-phase set is registration metadata:
//! the serving runtime has no forward/async-dispatch distinction, so the
//! phases are recorded and logged but do not gate execution.

use std::fmt;
use std::sync::Arc;

use axum::routing::MethodRouter;

use crate::container::pattern::{PatternError, UrlPattern};
use crate::container::Filter;

/// Stage of request processing a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherType {
    /// Initial client request.
    Request,
    /// Internal forward to another handler.
    Forward,
    /// Asynchronous continuation of a suspended request.
    Async,
}

impl DispatcherType {
    const ALL: [DispatcherType; 3] = [
        DispatcherType::Request,
        DispatcherType::Forward,
        DispatcherType::Async,
    ];

    fn bit(self) -> u8 {
        match self {
            DispatcherType::Request => 0b001,
            DispatcherType::Forward => 0b010,
            DispatcherType::Async => 0b100,
        }
    }
}

/// Small set of dispatch phases.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatcherSet(u8);

impl DispatcherSet {
    pub const EMPTY: DispatcherSet = DispatcherSet(0);

    /// Build a set from the given phases.
    pub fn of(types: &[DispatcherType]) -> Self {
        let mut bits = 0;
        for t in types {
            bits |= t.bit();
        }
        DispatcherSet(bits)
    }

    pub fn contains(&self, t: DispatcherType) -> bool {
        self.0 & t.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for DispatcherSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for t in DispatcherType::ALL {
            if self.contains(t) {
                set.entry(&t);
            }
        }
        set.finish()
    }
}

/// A filter registered against URL patterns and dispatch phases.
pub struct FilterRegistration {
    name: String,
    patterns: Vec<UrlPattern>,
    dispatchers: DispatcherSet,
    async_supported: bool,
    filter: Arc<dyn Filter>,
}

impl FilterRegistration {
    pub(crate) fn new(name: String, filter: Arc<dyn Filter>) -> Self {
        Self {
            name,
            patterns: Vec::new(),
            dispatchers: DispatcherSet::EMPTY,
            async_supported: false,
            filter,
        }
    }

    /// Map this filter to the given patterns for the given dispatch phases.
    /// Patterns accumulate across calls in call order.
    pub fn add_mapping_for_url_patterns(
        &mut self,
        dispatchers: DispatcherSet,
        patterns: &[&str],
    ) -> Result<&mut Self, PatternError> {
        for raw in patterns {
            self.patterns.push(UrlPattern::parse(raw)?);
        }
        self.dispatchers = DispatcherSet(self.dispatchers.0 | dispatchers.0);
        Ok(self)
    }

    /// Mark the filter as safe to run on asynchronously dispatched requests.
    pub fn set_async_supported(&mut self, supported: bool) -> &mut Self {
        self.async_supported = supported;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[UrlPattern] {
        &self.patterns
    }

    pub fn dispatchers(&self) -> DispatcherSet {
        self.dispatchers
    }

    pub fn is_async_supported(&self) -> bool {
        self.async_supported
    }

    pub(crate) fn filter(&self) -> Arc<dyn Filter> {
        self.filter.clone()
    }
}

impl fmt::Debug for FilterRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistration")
            .field("name", &self.name)
            .field("patterns", &self.patterns)
            .field("dispatchers", &self.dispatchers)
            .field("async_supported", &self.async_supported)
            .finish_non_exhaustive()
    }
}

/// A servlet (route handler) registered against URL patterns.
pub struct ServletRegistration {
    name: String,
    patterns: Vec<UrlPattern>,
    async_supported: bool,
    load_on_startup: Option<i32>,
    handler: MethodRouter,
}

impl ServletRegistration {
    pub(crate) fn new(name: String, handler: MethodRouter) -> Self {
        Self {
            name,
            patterns: Vec::new(),
            async_supported: false,
            load_on_startup: None,
            handler,
        }
    }

    /// Map this servlet to a servlet-style pattern.
    pub fn add_mapping(&mut self, pattern: &str) -> Result<&mut Self, PatternError> {
        self.patterns.push(UrlPattern::parse(pattern)?);
        Ok(self)
    }

    /// Mark the servlet as safe for asynchronous dispatch.
    pub fn set_async_supported(&mut self, supported: bool) -> &mut Self {
        self.async_supported = supported;
        self
    }

    /// Request eager initialization with the given priority; lower values
    /// initialize earlier, absent means lazy.
    pub fn set_load_on_startup(&mut self, priority: i32) -> &mut Self {
        self.load_on_startup = Some(priority);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[UrlPattern] {
        &self.patterns
    }

    pub fn is_async_supported(&self) -> bool {
        self.async_supported
    }

    pub fn load_on_startup(&self) -> Option<i32> {
        self.load_on_startup
    }

    pub(crate) fn handler(&self) -> MethodRouter {
        self.handler.clone()
    }
}

impl fmt::Debug for ServletRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServletRegistration")
            .field("name", &self.name)
            .field("patterns", &self.patterns)
            .field("async_supported", &self.async_supported)
            .field("load_on_startup", &self.load_on_startup)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_set_membership() {
        let set = DispatcherSet::of(&[DispatcherType::Request, DispatcherType::Async]);
        assert!(set.contains(DispatcherType::Request));
        assert!(set.contains(DispatcherType::Async));
        assert!(!set.contains(DispatcherType::Forward));
        assert!(DispatcherSet::EMPTY.is_empty());
    }

    #[test]
    fn test_mappings_accumulate_in_order() {
        let handler = axum::routing::get(|| async { "ok" });
        let mut reg = ServletRegistration::new("s".to_string(), handler);
        reg.add_mapping("/a/*").unwrap();
        reg.add_mapping("/b").unwrap();
        assert_eq!(reg.patterns().len(), 2);
        assert_eq!(reg.patterns()[0].to_string(), "/a/*");
        assert_eq!(reg.patterns()[1].to_string(), "/b");
    }
}
