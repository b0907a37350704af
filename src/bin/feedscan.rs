//! CLI binary for feedscan.
//!
//! Results go to stdout; all tracing output goes to stderr.

use clap::Parser;
use feedscan::config::AppConfig;
use feedscan::startup::{init_tracing, run_search};
use feedscan_search::DisplaySink;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Search every configured feed for a term and print the matches.
#[derive(Parser)]
#[command(name = "feedscan", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON feed list to search (overrides the config file).
    #[arg(short, long)]
    feeds: Option<PathBuf>,

    /// Per-request HTTP timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum number of feeds searched at once.
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Give up on feeds still running after this many seconds.
    #[arg(long)]
    deadline: Option<u64>,

    /// Search term (a regular expression).
    #[arg(default_value = "president")]
    term: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(feeds) = cli.feeds {
        config.search.feeds_path = feeds;
    }
    if let Some(timeout) = cli.timeout {
        config.search.timeout_seconds = timeout;
    }
    if cli.max_concurrent.is_some() {
        config.search.max_concurrent_feeds = cli.max_concurrent;
    }
    if cli.deadline.is_some() {
        config.search.run_timeout_seconds = cli.deadline;
    }
    config.validate()?;

    init_tracing(&config.logging.filter);

    // Handle Ctrl+C
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, cancelling search...");
            cancel_clone.cancel();
        }
    });

    let mut sink = DisplaySink::stdout();
    let summary = run_search(&config, &cli.term, &mut sink, cancel)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "feedscan failed");
            anyhow::anyhow!("feedscan failed: {e}")
        })?;

    info!(
        feeds = summary.feeds,
        results = summary.results_delivered,
        failed = summary.failed_feeds.len(),
        "search complete"
    );
    Ok(())
}
