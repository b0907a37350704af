//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls HTTP behaviour of the built-in matchers and the
//! resource bounds of a run. The defaults reproduce a plain fan-out: one
//! worker per feed, a single-slot handoff, no deadline.

use crate::error::SearchError;

/// Configuration for a search run.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-request HTTP timeout in seconds for matchers that fetch documents.
    pub timeout_seconds: u64,
    /// Capacity of the shared result channel. `1` is the closest to an
    /// unbuffered handoff: a worker waits until the aggregator has taken
    /// its previous result.
    pub channel_capacity: usize,
    /// Upper bound on feeds searched at the same time. `None` starts every
    /// worker immediately.
    pub max_concurrent_feeds: Option<usize>,
    /// Deadline for the whole run in seconds. When it passes, outstanding
    /// workers are cancelled and the run finishes with what it has.
    pub run_timeout_seconds: Option<u64>,
    /// Custom User-Agent string. If `None`, `feedscan/<version>` is used.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            channel_capacity: 1,
            max_concurrent_feeds: None,
            run_timeout_seconds: None,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `channel_capacity` must be greater than 0
    /// - `max_concurrent_feeds`, when set, must be greater than 0
    /// - `run_timeout_seconds`, when set, must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(SearchError::Config(
                "channel_capacity must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_feeds == Some(0) {
            return Err(SearchError::Config(
                "max_concurrent_feeds must be greater than 0".into(),
            ));
        }
        if self.run_timeout_seconds == Some(0) {
            return Err(SearchError::Config(
                "run_timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
