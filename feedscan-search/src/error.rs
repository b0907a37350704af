//! Error types for the feedscan-search crate.
//!
//! Configuration errors (`AlreadyRegistered`, `FeedSource`, `Config`) abort
//! startup. Everything a matcher returns is a per-feed failure: it is
//! logged and the run carries on without that feed's results.

/// Errors that can occur while registering matchers or running a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A matcher was already bound to this feed type tag.
    #[error("matcher already registered for feed type: {0}")]
    AlreadyRegistered(String),

    /// The feed list could not be read or decoded.
    #[error("feed source error: {0}")]
    FeedSource(String),

    /// An HTTP request for a feed document failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A feed document could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The search term is not a valid pattern.
    #[error("invalid search pattern: {0}")]
    Pattern(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The result sink refused a result.
    #[error("sink error: {0}")]
    Sink(String),

    /// A dispatch worker task ended abnormally.
    #[error("worker error: {0}")]
    Worker(String),
}

/// Convenience type alias for feedscan-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
