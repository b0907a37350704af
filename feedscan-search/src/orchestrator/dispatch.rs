//! Dispatch worker: searches one feed and forwards its results.
//!
//! # Lifecycle
//!
//! ```text
//! Started → Matching → (ResultsForwarded)* → Done
//!              │
//!              └── failure / cancellation ──► Done
//! ```
//!
//! A worker counts the run's latch down exactly once on every path. Its
//! failures are logged and reported in its [`WorkerOutcome`]; they never
//! reach the result stream and never stop other workers.

use std::sync::Arc;

use tokio::sync::mpsc::WeakSender;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

use super::latch::{CountDownGuard, CountdownLatch};
use crate::matcher::Matcher;
use crate::types::{Feed, SearchResult};

/// How a worker finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerStatus {
    /// The matcher succeeded and every result was forwarded.
    Completed,
    /// The matcher failed; nothing was forwarded.
    Failed(String),
    /// The run was cancelled, or its consumer went away, before the worker
    /// finished forwarding.
    Cancelled,
}

/// What one worker did for its feed.
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    /// Name of the feed the worker searched.
    pub feed: String,
    /// Number of results handed to the result channel.
    pub forwarded: usize,
    pub status: WorkerStatus,
}

/// One feed bound to its resolved matcher, ready to run on its own task.
pub struct DispatchWorker {
    pub(crate) feed: Arc<Feed>,
    pub(crate) matcher: Arc<dyn Matcher>,
    pub(crate) term: Arc<str>,
    pub(crate) results: WeakSender<SearchResult>,
    pub(crate) latch: Arc<CountdownLatch>,
    pub(crate) cancel: CancellationToken,
    pub(crate) permits: Option<Arc<Semaphore>>,
}

impl DispatchWorker {
    /// Search the feed and forward its results in order.
    pub async fn run(self) -> WorkerOutcome {
        // Dropped last: counts down after every sender handle below is gone.
        let _done = CountDownGuard::new(Arc::clone(&self.latch));

        let _permit = match self.acquire_permit().await {
            Some(permit) => permit,
            None => return self.outcome(0, WorkerStatus::Cancelled),
        };

        tracing::debug!(
            feed = %self.feed.name,
            feed_type = %self.feed.feed_type,
            matcher = self.matcher.name(),
            "searching feed"
        );

        let searched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(feed = %self.feed.name, "search cancelled");
                return self.outcome(0, WorkerStatus::Cancelled);
            }
            searched = self.matcher.search(&self.feed, &self.term) => searched,
        };

        let results = match searched {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(
                    feed = %self.feed.name,
                    feed_type = %self.feed.feed_type,
                    error = %err,
                    "feed search failed"
                );
                return self.outcome(0, WorkerStatus::Failed(err.to_string()));
            }
        };

        let (forwarded, status) = self.forward(results).await;
        tracing::debug!(feed = %self.feed.name, forwarded, "feed done");
        self.outcome(forwarded, status)
    }

    /// Wait for a concurrency permit when the run is bounded.
    ///
    /// Returns `None` if the run is cancelled while waiting.
    async fn acquire_permit(&self) -> Option<Option<OwnedSemaphorePermit>> {
        let Some(permits) = &self.permits else {
            return Some(None);
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            permit = Arc::clone(permits).acquire_owned() => permit.ok().map(Some),
        }
    }

    async fn forward(&self, results: Vec<SearchResult>) -> (usize, WorkerStatus) {
        if results.is_empty() {
            return (0, WorkerStatus::Completed);
        }

        // The sentinel keeps the channel open until this worker counts down,
        // so this only fails when the consumer side is already gone.
        let Some(sender) = self.results.upgrade() else {
            return (0, WorkerStatus::Cancelled);
        };

        let mut forwarded = 0;
        for result in results {
            let sent = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => false,
                sent = sender.send(result) => sent.is_ok(),
            };
            if !sent {
                tracing::debug!(feed = %self.feed.name, forwarded, "forwarding stopped");
                return (forwarded, WorkerStatus::Cancelled);
            }
            forwarded += 1;
        }
        (forwarded, WorkerStatus::Completed)
    }

    fn outcome(&self, forwarded: usize, status: WorkerStatus) -> WorkerOutcome {
        WorkerOutcome {
            feed: self.feed.name.clone(),
            forwarded,
            status,
        }
    }
}
