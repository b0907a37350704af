//! Composition root: logging, matcher registration, and the search run.
//!
//! Every matcher the application ships is registered here, explicitly and
//! before any run starts. A duplicate registration is a broken build and
//! aborts startup.

use feedscan_search::matchers;
use feedscan_search::{
    JsonFileFeedSource, MatcherRegistry, Orchestrator, ResultSink, RunSummary, SearchConfig,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::Result;

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();
}

/// Build the registry with every built-in matcher.
///
/// # Errors
///
/// Returns an error if a feed type is registered twice or a matcher cannot
/// be constructed.
pub fn build_registry(config: &SearchConfig) -> Result<MatcherRegistry> {
    let mut registry = MatcherRegistry::empty();
    matchers::default::register(&mut registry)?;
    matchers::rss::register(&mut registry, config)?;
    Ok(registry)
}

/// Load feeds from the configured file and search them for `term`.
///
/// # Errors
///
/// Returns an error if `term` is not a valid pattern, registration fails,
/// the feed list cannot be loaded, or the sink fails. Individual feed failures only show in the summary.
pub async fn run_search<S>(
    config: &AppConfig,
    term: &str,
    sink: &mut S,
    cancel: CancellationToken,
) -> Result<RunSummary>
where
    S: ResultSink + ?Sized,
{
    matchers::rss::compile_term(term)?;
    let search_config = config.search.to_search_config();
    let registry = build_registry(&search_config)?;
    let source = JsonFileFeedSource::new(&config.search.feeds_path);

    tracing::info!(
        feeds_path = %config.search.feeds_path.display(),
        matchers = ?registry.tags(),
        "starting feedscan"
    );

    let summary = Orchestrator::new(&registry, search_config)
        .with_cancel_token(cancel)
        .run(&source, term, sink)
        .await?;
    Ok(summary)
}
