//! Search orchestrator: fan-out to dispatch workers, fan-in to a sink.
//!
//! Each feed gets its own worker task. Workers push results into one
//! bounded channel; the run's caller drains it into a
//! [`ResultSink`](crate::sink::ResultSink). A countdown latch tracks the
//! workers still running, and the completion sentinel closes the channel
//! once it reaches zero.

pub mod dispatch;
pub mod latch;
pub mod run;
pub mod sentinel;

pub use dispatch::{WorkerOutcome, WorkerStatus};
pub use run::{FeedFailure, Orchestrator, RunSummary};
