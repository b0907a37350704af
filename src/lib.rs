//! feedscan: search many feeds at once for a term.
//!
//! The application side of the workspace. The search engine itself lives
//! in the `feedscan-search` crate; this crate adds:
//!
//! - **Configuration**: TOML file with `[search]` and `[logging]` sections
//! - **Startup**: tracing setup and explicit registration of every matcher
//! - **CLI**: the `feedscan` binary, printing results to stdout

pub mod config;
pub mod error;
pub mod startup;

pub use config::AppConfig;
pub use error::{AppError, Result};
