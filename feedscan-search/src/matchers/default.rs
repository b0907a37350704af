//! Fallback matcher for feeds whose type has no registered matcher.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SearchError;
use crate::matcher::Matcher;
use crate::registry::{MatcherRegistry, DEFAULT_FEED_TYPE};
use crate::types::{Feed, SearchResult};

/// Matches nothing and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcher;

#[async_trait]
impl Matcher for DefaultMatcher {
    async fn search(&self, feed: &Feed, _term: &str) -> Result<Vec<SearchResult>, SearchError> {
        tracing::debug!(feed = %feed.name, feed_type = %feed.feed_type, "default matcher, no results");
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        DEFAULT_FEED_TYPE
    }
}

/// Bind [`DefaultMatcher`] to `"default"` in a registry built with
/// [`MatcherRegistry::empty`].
///
/// # Errors
///
/// Returns [`SearchError::AlreadyRegistered`] if `"default"` is already bound.
pub fn register(registry: &mut MatcherRegistry) -> Result<(), SearchError> {
    registry.register(DEFAULT_FEED_TYPE, Arc::new(DefaultMatcher))
}
