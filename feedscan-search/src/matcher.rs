//! Trait definition for pluggable matchers.
//!
//! A matcher knows how to search one kind of feed. Matchers are selected
//! at run time by the feed's type tag through the
//! [`MatcherRegistry`](crate::registry::MatcherRegistry), so the trait is
//! object safe and used as `Arc<dyn Matcher>`.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::types::{Feed, SearchResult};

/// A search strategy for one kind of feed.
///
/// Implementations must not mutate the feed or any shared state, but may
/// perform arbitrary I/O (HTTP fetches, file reads, parsing) internally.
///
/// All implementations must be `Send + Sync`: one instance is shared by
/// every worker searching a feed of its type.
#[async_trait]
pub trait Matcher: Send + Sync {
    /// Search `feed` for `term` and return the matching items in source order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if this feed could not be searched. The
    /// orchestrator logs the error and treats the feed as having no results.
    async fn search(&self, feed: &Feed, term: &str) -> Result<Vec<SearchResult>, SearchError>;

    /// Short name used in log events.
    fn name(&self) -> &'static str;
}
