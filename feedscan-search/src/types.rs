//! Core types: feeds to search and the results they produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One data source to be searched.
///
/// The on-disk field names (`site`, `link`, `type`) follow the feed list
/// format read by [`crate::feeds::JsonFileFeedSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// Human-readable name of the source.
    #[serde(rename = "site")]
    pub name: String,
    /// Where the source lives, usually an HTTP URL.
    #[serde(rename = "link")]
    pub uri: String,
    /// Type tag used to select a matcher from the registry.
    #[serde(rename = "type")]
    pub feed_type: String,
}

impl Feed {
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        feed_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            feed_type: feed_type.into(),
        }
    }
}

/// A single matched item produced by a matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Which part of the source matched, e.g. `Title` or `Description`.
    pub field: String,
    /// The matched text.
    pub content: String,
}

impl SearchResult {
    pub fn new(field: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            content: content.into(),
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\n{}", self.field, self.content)
    }
}
