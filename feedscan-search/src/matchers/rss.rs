//! RSS 2.0 matcher.
//!
//! Fetches the feed document at `feed.uri`, decodes its `<item>` entries and
//! reports every title or description that matches the search term. The term
//! is treated as a regular expression.

use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::matcher::Matcher;
use crate::registry::MatcherRegistry;
use crate::types::{Feed, SearchResult};

/// Feed type tag handled by [`RssMatcher`].
pub const RSS_FEED_TYPE: &str = "rss";

/// Field label for matches found in an item title.
pub const TITLE_FIELD: &str = "Title";

/// Field label for matches found in an item description.
pub const DESCRIPTION_FIELD: &str = "Description";

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Searches RSS 2.0 feeds over HTTP.
///
/// One instance is shared by every worker searching an `rss` feed; the
/// underlying [`reqwest::Client`] pools connections across them.
#[derive(Debug, Clone)]
pub struct RssMatcher {
    client: reqwest::Client,
}

impl RssMatcher {
    /// Create a matcher whose HTTP client follows `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: http::build_client(config)?,
        })
    }

    async fn fetch(&self, feed: &Feed) -> Result<String, SearchError> {
        let url = parse_feed_uri(&feed.uri)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("{} request failed: {e}", feed.name)))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("{} HTTP error: {e}", feed.name)))?;

        response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("{} response read failed: {e}", feed.name)))
    }
}

#[async_trait]
impl Matcher for RssMatcher {
    async fn search(&self, feed: &Feed, term: &str) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(feed = %feed.name, term, "RSS search");

        let pattern = compile_term(term)?;
        let xml = self.fetch(feed).await?;

        tracing::trace!(feed = %feed.name, bytes = xml.len(), "RSS document received");

        let results = match_rss_document(&xml, &pattern)?;
        tracing::debug!(feed = %feed.name, count = results.len(), "RSS items matched");
        Ok(results)
    }

    fn name(&self) -> &'static str {
        RSS_FEED_TYPE
    }
}

/// Bind a new [`RssMatcher`] to `"rss"`.
///
/// # Errors
///
/// Returns [`SearchError::AlreadyRegistered`] if `"rss"` is already bound,
/// or [`SearchError::Http`] if the HTTP client cannot be built.
pub fn register(registry: &mut MatcherRegistry, config: &SearchConfig) -> Result<(), SearchError> {
    registry.register(RSS_FEED_TYPE, Arc::new(RssMatcher::new(config)?))
}

/// Compile a search term into the pattern matched against items.
///
/// Callers can check a term once before a run so an invalid pattern is
/// reported once rather than as a failure of every `rss` feed.
///
/// # Errors
///
/// Returns [`SearchError::Pattern`] if `term` is not a valid regular expression.
pub fn compile_term(term: &str) -> Result<Regex, SearchError> {
    Regex::new(term).map_err(|e| SearchError::Pattern(e.to_string()))
}

fn parse_feed_uri(uri: &str) -> Result<Url, SearchError> {
    if uri.trim().is_empty() {
        return Err(SearchError::Http("feed has no URI".into()));
    }
    let url = Url::parse(uri).map_err(|e| SearchError::Http(format!("invalid feed URI {uri}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SearchError::Http(format!(
            "unsupported feed URI scheme: {other}"
        ))),
    }
}

/// Decode an RSS document and collect the items matching `pattern`.
///
/// Extracted as a separate function for testability with canned documents.
/// Each item can yield a title match followed by a description match.
pub(crate) fn match_rss_document(
    xml: &str,
    pattern: &Regex,
) -> Result<Vec<SearchResult>, SearchError> {
    let document: RssDocument = quick_xml::de::from_str(xml)
        .map_err(|e| SearchError::Parse(format!("invalid RSS document: {e}")))?;

    let mut results = Vec::new();
    for item in document.channel.items {
        let title = item.title.trim();
        if pattern.is_match(title) {
            results.push(SearchResult::new(TITLE_FIELD, title));
        }

        let description = html_to_text(&item.description);
        if pattern.is_match(&description) {
            results.push(SearchResult::new(DESCRIPTION_FIELD, description));
        }
    }
    Ok(results)
}

/// Reduce a description that may carry HTML markup to its visible text.
fn html_to_text(fragment: &str) -> String {
    if !fragment.contains('<') {
        return fragment.trim().to_string();
    }
    let html = Html::parse_fragment(fragment);
    let text: String = html.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
