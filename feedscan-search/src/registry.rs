//! Matcher registry keyed by feed type tag.
//!
//! The [`MatcherRegistry`] is built once during startup: each matcher
//! module exposes a `register` function that the composition root calls.
//! A run only borrows the registry immutably, so every registration
//! happens before the first lookup and no locking is needed.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SearchError;
use crate::matcher::Matcher;
use crate::matchers::default::DefaultMatcher;

/// Feed type tag of the fallback matcher.
pub const DEFAULT_FEED_TYPE: &str = "default";

/// Registry of matchers by feed type tag.
///
/// Matchers are registered with [`register()`](Self::register) and looked
/// up with [`resolve()`](Self::resolve). A tag can be bound only once.
pub struct MatcherRegistry {
    matchers: HashMap<String, Arc<dyn Matcher>>,
}

impl MatcherRegistry {
    /// Create a registry with the [`DefaultMatcher`] bound to `"default"`.
    pub fn new() -> Self {
        let mut matchers: HashMap<String, Arc<dyn Matcher>> = HashMap::new();
        matchers.insert(DEFAULT_FEED_TYPE.to_string(), Arc::new(DefaultMatcher));
        Self { matchers }
    }

    /// Create a registry with no bindings at all.
    pub fn empty() -> Self {
        Self {
            matchers: HashMap::new(),
        }
    }

    /// Bind `matcher` to `feed_type`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::AlreadyRegistered`] if the tag is already
    /// bound. The first binding is kept.
    pub fn register(
        &mut self,
        feed_type: impl Into<String>,
        matcher: Arc<dyn Matcher>,
    ) -> Result<(), SearchError> {
        let feed_type = feed_type.into();
        if self.matchers.contains_key(&feed_type) {
            return Err(SearchError::AlreadyRegistered(feed_type));
        }
        tracing::info!(feed_type = %feed_type, matcher = matcher.name(), "registered matcher");
        self.matchers.insert(feed_type, matcher);
        Ok(())
    }

    /// Look up the matcher bound to `feed_type`.
    pub fn resolve(&self, feed_type: &str) -> Option<Arc<dyn Matcher>> {
        self.matchers.get(feed_type).cloned()
    }

    /// Look up the matcher for `feed_type`, falling back to the `"default"`
    /// binding and then to a plain [`DefaultMatcher`].
    pub fn resolve_or_default(&self, feed_type: &str) -> Arc<dyn Matcher> {
        self.resolve(feed_type)
            .or_else(|| self.resolve(DEFAULT_FEED_TYPE))
            .unwrap_or_else(|| Arc::new(DefaultMatcher))
    }

    /// Whether `feed_type` has a binding.
    pub fn contains(&self, feed_type: &str) -> bool {
        self.matchers.contains_key(feed_type)
    }

    /// Registered feed type tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.matchers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for MatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatcherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
