//! Completion sentinel: the single closer of a run's result channel.
//!
//! Workers only hold [`WeakSender`](tokio::sync::mpsc::WeakSender)s, which
//! do not keep the channel open. The sentinel owns the one strong
//! [`Sender`], so the channel closes exactly when the sentinel lets go of
//! it, and it only does so after every worker has counted down.

use std::sync::Arc;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use super::latch::CountdownLatch;

/// Holds the result channel open until the latch reaches zero.
#[derive(Debug)]
pub struct CompletionSentinel<T> {
    latch: Arc<CountdownLatch>,
    closer: Sender<T>,
}

impl<T: Send + 'static> CompletionSentinel<T> {
    /// `closer` must be the only strong sender of the channel.
    pub fn new(latch: Arc<CountdownLatch>, closer: Sender<T>) -> Self {
        Self { latch, closer }
    }

    /// Wait for every worker, then close the channel.
    ///
    /// Consumes the sentinel: a channel can be closed once.
    pub async fn close_when_done(self) {
        self.latch.wait().await;
        drop(self.closer);
        tracing::debug!("all workers done, result channel closed");
    }

    /// Run [`close_when_done`](Self::close_when_done) on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.close_when_done())
    }
}
