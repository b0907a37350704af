//! Countdown latch counting the workers of a run that are still outstanding.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// An atomic counter whose transition to zero wakes every waiter.
///
/// Each dispatch worker counts down exactly once, through a
/// [`CountDownGuard`], whichever way it finishes. The completion sentinel
/// waits for zero.
#[derive(Debug)]
pub struct CountdownLatch {
    remaining: AtomicUsize,
    zero: Notify,
}

impl CountdownLatch {
    /// Create a latch expecting `count` count-downs.
    pub fn new(count: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(count),
            zero: Notify::new(),
        }
    }

    /// Decrement the count. Saturates at zero; only the call that takes the
    /// count from one to zero wakes the waiters.
    pub fn count_down(&self) {
        let previous = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        if previous == Ok(1) {
            self.zero.notify_waiters();
        }
    }

    /// Number of count-downs still expected.
    pub fn count(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Wait until the count reaches zero. Returns at once if it already has.
    pub async fn wait(&self) {
        loop {
            let notified = self.zero.notified();
            tokio::pin!(notified);
            // Register before checking so a concurrent zero-transition is not missed.
            notified.as_mut().enable();
            if self.count() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Counts a latch down when dropped.
///
/// Held for the whole life of a dispatch worker so the count-down also
/// happens when the worker returns early or its matcher panics.
#[derive(Debug)]
pub struct CountDownGuard {
    latch: Arc<CountdownLatch>,
}

impl CountDownGuard {
    pub fn new(latch: Arc<CountdownLatch>) -> Self {
        Self { latch }
    }
}

impl Drop for CountDownGuard {
    fn drop(&mut self) {
        self.latch.count_down();
    }
}
