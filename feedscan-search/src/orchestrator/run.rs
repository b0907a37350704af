//! Run orchestrator: fan-out to one worker per feed, fan-in to a sink.
//!
//! # Pipeline
//!
//! 1. Validate the config and load the feed list
//! 2. Allocate the bounded result channel and a latch set to the feed count
//! 3. Resolve each feed's matcher (falling back to `default`) and spawn a
//!    [`DispatchWorker`]
//! 4. Spawn the [`CompletionSentinel`], the only holder of a strong sender
//! 5. Drain the channel into the sink until it closes
//! 6. Join the workers and summarise

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::dispatch::{DispatchWorker, WorkerStatus};
use super::latch::CountdownLatch;
use super::sentinel::CompletionSentinel;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::feeds::FeedSource;
use crate::registry::MatcherRegistry;
use crate::sink::{CollectSink, ResultSink};
use crate::types::SearchResult;

/// A feed whose matcher failed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFailure {
    pub feed: String,
    pub error: String,
}

/// What happened during one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of feeds in the run.
    pub feeds: usize,
    /// Number of results handed to the sink.
    pub results_delivered: usize,
    /// Feeds whose worker finished normally, including those with no results.
    pub completed_feeds: usize,
    /// Feeds whose matcher failed or whose worker task died.
    pub failed_feeds: Vec<FeedFailure>,
    /// Feeds whose worker was cancelled before it finished.
    pub cancelled_feeds: Vec<String>,
    /// Whether the run deadline passed.
    pub timed_out: bool,
}

impl RunSummary {
    /// `true` when every feed was searched to completion.
    pub fn is_complete(&self) -> bool {
        self.completed_feeds == self.feeds
    }
}

/// Runs searches over a borrowed [`MatcherRegistry`].
///
/// Borrowing the registry for the life of the orchestrator keeps it
/// read-only while runs are in flight.
pub struct Orchestrator<'r> {
    registry: &'r MatcherRegistry,
    config: SearchConfig,
    cancel: CancellationToken,
}

impl<'r> Orchestrator<'r> {
    pub fn new(registry: &'r MatcherRegistry, config: SearchConfig) -> Self {
        Self {
            registry,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `cancel` to stop runs from outside (e.g. on Ctrl+C).
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels every run of this orchestrator.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Search every feed from `source` for `term`, delivering results to `sink`.
    ///
    /// Results from one feed reach the sink in the order its matcher produced
    /// them; results from different feeds interleave arbitrarily. Per-feed
    /// failures are logged and listed in the returned [`RunSummary`].
    ///
    /// # Errors
    ///
    /// - [`SearchError::Config`] if the configuration is invalid
    /// - [`SearchError::FeedSource`] if the feed list cannot be loaded
    /// - [`SearchError::Sink`] if the sink refuses a result
    pub async fn run<S>(
        &self,
        source: &dyn FeedSource,
        term: &str,
        sink: &mut S,
    ) -> Result<RunSummary, SearchError>
    where
        S: ResultSink + ?Sized,
    {
        self.config.validate()?;
        let feeds = source.load()?;

        tracing::info!(feeds = feeds.len(), "search run starting");
        tracing::trace!(term, "search term");

        let feed_count = feeds.len();
        let term: Arc<str> = Arc::from(term);
        let cancel = self.cancel.child_token();
        let (results_tx, mut results_rx) = mpsc::channel(self.config.channel_capacity);
        let latch = Arc::new(CountdownLatch::new(feed_count));
        let permits = self
            .config
            .max_concurrent_feeds
            .map(|limit| Arc::new(Semaphore::new(limit)));

        let mut workers = Vec::with_capacity(feed_count);
        for feed in feeds {
            if !self.registry.contains(&feed.feed_type) {
                tracing::debug!(
                    feed = %feed.name,
                    feed_type = %feed.feed_type,
                    "no matcher registered, using default"
                );
            }
            let matcher = self.registry.resolve_or_default(&feed.feed_type);
            let name = feed.name.clone();
            let worker = DispatchWorker {
                feed: Arc::new(feed),
                matcher,
                term: Arc::clone(&term),
                results: results_tx.downgrade(),
                latch: Arc::clone(&latch),
                cancel: cancel.clone(),
                permits: permits.clone(),
            };
            workers.push((name, tokio::spawn(worker.run())));
        }

        let sentinel = CompletionSentinel::new(latch, results_tx).spawn();

        let mut summary = RunSummary {
            feeds: feed_count,
            ..RunSummary::default()
        };
        let deadline = self
            .config
            .run_timeout_seconds
            .map(|secs| Instant::now() + Duration::from_secs(secs));

        loop {
            let next = match deadline {
                Some(deadline) if !summary.timed_out => {
                    match tokio::time::timeout_at(deadline, results_rx.recv()).await {
                        Ok(next) => next,
                        Err(_) => {
                            tracing::warn!("search run deadline passed, cancelling outstanding feeds");
                            summary.timed_out = true;
                            cancel.cancel();
                            continue;
                        }
                    }
                }
                _ => results_rx.recv().await,
            };

            let Some(result) = next else {
                break;
            };
            if let Err(err) = sink.deliver(result) {
                tracing::error!(error = %err, "result sink failed, cancelling run");
                cancel.cancel();
                return Err(SearchError::Sink(err.to_string()));
            }
            summary.results_delivered += 1;
        }

        if let Err(err) = sentinel.await {
            tracing::error!(error = %err, "completion sentinel task failed");
        }

        for (feed, handle) in workers {
            match handle.await {
                Ok(outcome) => match outcome.status {
                    WorkerStatus::Completed => summary.completed_feeds += 1,
                    WorkerStatus::Failed(error) => summary.failed_feeds.push(FeedFailure {
                        feed: outcome.feed,
                        error,
                    }),
                    WorkerStatus::Cancelled => summary.cancelled_feeds.push(outcome.feed),
                },
                Err(err) => {
                    tracing::error!(feed = %feed, error = %err, "dispatch worker task failed");
                    summary.failed_feeds.push(FeedFailure {
                        feed,
                        error: SearchError::Worker(err.to_string()).to_string(),
                    });
                }
            }
        }

        tracing::info!(
            feeds = summary.feeds,
            delivered = summary.results_delivered,
            failed = summary.failed_feeds.len(),
            cancelled = summary.cancelled_feeds.len(),
            "search run finished"
        );
        Ok(summary)
    }

    /// Run a search and collect every result in delivery order.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn collect(
        &self,
        source: &dyn FeedSource,
        term: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let mut sink = CollectSink::new();
        self.run(source, term, &mut sink).await?;
        Ok(sink.into_results())
    }
}
