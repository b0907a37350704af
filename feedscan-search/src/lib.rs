//! # feedscan-search
//!
//! Concurrent search across a list of heterogeneous feeds.
//!
//! Every feed carries a type tag. A [`MatcherRegistry`] maps tags to
//! [`Matcher`] implementations; feeds with an unknown tag fall back to the
//! `default` matcher, which finds nothing. A run starts one worker task per
//! feed and merges all of their results into a single stream delivered to a
//! [`ResultSink`].
//!
//! ## Design
//!
//! - The registry is filled during startup and only borrowed during runs
//! - Results flow through one bounded channel (single-slot by default)
//! - A countdown latch tracks outstanding workers; the completion sentinel
//!   is the only task that can close the channel
//! - A failing feed is logged and skipped; it never stops other feeds
//! - Results of one feed keep their order; different feeds interleave
//! - Optional run deadline, concurrency bound, and external cancellation

pub mod config;
pub mod error;
pub mod feeds;
pub mod http;
pub mod matcher;
pub mod matchers;
pub mod orchestrator;
pub mod registry;
pub mod sink;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use feeds::{FeedSource, JsonFileFeedSource, StaticFeedSource};
pub use matcher::Matcher;
pub use orchestrator::{FeedFailure, Orchestrator, RunSummary};
pub use registry::MatcherRegistry;
pub use sink::{CollectSink, DisplaySink, ResultSink};
pub use types::{Feed, SearchResult};

/// Search every feed from `source` for `term` and deliver results to `sink`.
///
/// Convenience wrapper around [`Orchestrator::run`].
///
/// # Errors
///
/// Returns [`SearchError::FeedSource`] if the feed list cannot be loaded,
/// [`SearchError::Config`] for an invalid `config`, or
/// [`SearchError::Sink`] if the sink fails. Individual feed failures are
/// logged and reported in the [`RunSummary`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> feedscan_search::Result<()> {
/// use feedscan_search::{DisplaySink, JsonFileFeedSource, MatcherRegistry, SearchConfig};
///
/// let config = SearchConfig::default();
/// let mut registry = MatcherRegistry::new();
/// feedscan_search::matchers::rss::register(&mut registry, &config)?;
///
/// let source = JsonFileFeedSource::new("data/data.json");
/// let summary = feedscan_search::run(
///     &registry,
///     &source,
///     "president",
///     &config,
///     &mut DisplaySink::stdout(),
/// )
/// .await?;
/// println!("{} results", summary.results_delivered);
/// # Ok(())
/// # }
/// ```
pub async fn run<S>(
    registry: &MatcherRegistry,
    source: &dyn FeedSource,
    term: &str,
    config: &SearchConfig,
    sink: &mut S,
) -> Result<RunSummary>
where
    S: ResultSink + ?Sized,
{
    Orchestrator::new(registry, config.clone())
        .run(source, term, sink)
        .await
}

/// Search every feed from `source` for `term` and collect the results.
///
/// # Errors
///
/// Same as [`run`].
pub async fn search(
    registry: &MatcherRegistry,
    source: &dyn FeedSource,
    term: &str,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    Orchestrator::new(registry, config.clone())
        .collect(source, term)
        .await
}
