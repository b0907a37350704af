//! Feed sources: where a run gets its list of feeds from.
//!
//! A source either returns the full list or fails. A failure means the
//! run cannot start at all; it is not a per-feed error.

use std::path::{Path, PathBuf};

use crate::error::SearchError;
use crate::types::Feed;

/// Supplies the ordered list of feeds for a run.
pub trait FeedSource: Send + Sync {
    /// Load every feed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::FeedSource`] if the list cannot be read or decoded.
    fn load(&self) -> Result<Vec<Feed>, SearchError>;
}

/// Reads a JSON array of `{"site", "link", "type"}` objects from a file.
#[derive(Debug, Clone)]
pub struct JsonFileFeedSource {
    path: PathBuf,
}

impl JsonFileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedSource for JsonFileFeedSource {
    fn load(&self) -> Result<Vec<Feed>, SearchError> {
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| SearchError::FeedSource(format!("{}: {e}", self.path.display())))?;
        let feeds = decode_feed_list(&json)
            .map_err(|e| SearchError::FeedSource(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), count = feeds.len(), "feeds loaded");
        Ok(feeds)
    }
}

/// A fixed, in-memory feed list.
#[derive(Debug, Clone, Default)]
pub struct StaticFeedSource {
    feeds: Vec<Feed>,
}

impl StaticFeedSource {
    pub fn new(feeds: Vec<Feed>) -> Self {
        Self { feeds }
    }
}

impl From<Vec<Feed>> for StaticFeedSource {
    fn from(feeds: Vec<Feed>) -> Self {
        Self::new(feeds)
    }
}

impl FeedSource for StaticFeedSource {
    fn load(&self) -> Result<Vec<Feed>, SearchError> {
        Ok(self.feeds.clone())
    }
}

/// Decode a feed list from a JSON string.
///
/// # Errors
///
/// Returns [`SearchError::FeedSource`] if `json` is not a valid feed list.
pub fn parse_feed_list(json: &str) -> Result<Vec<Feed>, SearchError> {
    decode_feed_list(json).map_err(|e| SearchError::FeedSource(e.to_string()))
}

fn decode_feed_list(json: &str) -> Result<Vec<Feed>, serde_json::Error> {
    serde_json::from_str(json)
}
