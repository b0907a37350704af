//! Built-in matcher implementations.
//!
//! Each module provides a struct implementing [`crate::matcher::Matcher`]
//! and a `register` function that binds it in a
//! [`MatcherRegistry`](crate::registry::MatcherRegistry).

pub mod default;
pub mod rss;

pub use default::DefaultMatcher;
pub use rss::RssMatcher;
