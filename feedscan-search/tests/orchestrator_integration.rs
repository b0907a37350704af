//! Integration tests for the fan-out/fan-in run.
//!
//! Most tests use in-process matchers. The RSS tests serve canned feed
//! documents from a local mock HTTP server; nothing reaches the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use feedscan_search::matchers::rss;
use feedscan_search::{
    CollectSink, Feed, Matcher, MatcherRegistry, Orchestrator, SearchConfig, SearchError,
    SearchResult, StaticFeedSource,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Produces `count` ordered results per feed, or fails for selected feeds.
struct SequenceMatcher {
    count: usize,
    failing: Vec<String>,
    calls: AtomicUsize,
}

impl SequenceMatcher {
    fn new(count: usize, failing: &[&str]) -> Self {
        Self {
            count,
            failing: failing.iter().map(|s| s.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Matcher for SequenceMatcher {
    async fn search(&self, feed: &Feed, term: &str) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Give other workers a chance to interleave.
        tokio::task::yield_now().await;
        if self.failing.contains(&feed.name) {
            return Err(SearchError::Http(format!("{} is down", feed.name)));
        }
        Ok((0..self.count)
            .map(|i| SearchResult::new(feed.name.clone(), format!("{term} #{i}")))
            .collect())
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Panics while searching the feed named `boom`; one result otherwise.
struct PanickingMatcher;

#[async_trait]
impl Matcher for PanickingMatcher {
    async fn search(&self, feed: &Feed, _term: &str) -> Result<Vec<SearchResult>, SearchError> {
        if feed.name == "boom" {
            panic!("matcher blew up on {}", feed.name);
        }
        Ok(vec![SearchResult::new("Title", "ok")])
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

fn feed_list(names: &[String], feed_type: &str) -> StaticFeedSource {
    StaticFeedSource::new(
        names
            .iter()
            .map(|n| Feed::new(n.clone(), format!("http://{n}.test/feed"), feed_type))
            .collect(),
    )
}

fn names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("feed{i}")).collect()
}

async fn run_collect(
    registry: &MatcherRegistry,
    source: &StaticFeedSource,
    term: &str,
) -> (feedscan_search::RunSummary, Vec<SearchResult>) {
    let orchestrator = Orchestrator::new(registry, SearchConfig::default());
    let mut sink = CollectSink::new();
    let summary = tokio::time::timeout(
        Duration::from_secs(10),
        orchestrator.run(source, term, &mut sink),
    )
    .await
    .expect("run must not deadlock")
    .expect("run");
    (summary, sink.into_results())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn completes_for_any_feed_count_even_when_all_fail() {
    for count in [0usize, 1, 2, 17, 64] {
        let all = names(count);
        let failing: Vec<&str> = all.iter().map(String::as_str).collect();
        let mut registry = MatcherRegistry::new();
        registry
            .register("seq", Arc::new(SequenceMatcher::new(3, &failing)))
            .expect("register");

        let (summary, results) = run_collect(&registry, &feed_list(&all, "seq"), "x").await;
        assert_eq!(summary.feeds, count);
        assert_eq!(summary.failed_feeds.len(), count);
        assert!(results.is_empty());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failing_feed_does_not_affect_others() {
    let all = names(8);
    let mut registry = MatcherRegistry::new();
    registry
        .register("seq", Arc::new(SequenceMatcher::new(5, &["feed3"])))
        .expect("register");

    let (summary, results) = run_collect(&registry, &feed_list(&all, "seq"), "x").await;

    assert_eq!(results.len(), 7 * 5);
    assert_eq!(summary.results_delivered, 35);
    assert_eq!(summary.completed_feeds, 7);
    assert_eq!(summary.failed_feeds.len(), 1);
    assert_eq!(summary.failed_feeds[0].feed, "feed3");
    assert!(results.iter().all(|r| r.field != "feed3"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn panicking_matcher_fails_only_its_feed() {
    let mut registry = MatcherRegistry::new();
    registry
        .register("boom", Arc::new(PanickingMatcher))
        .expect("register");
    let feeds = vec!["ok".to_string(), "boom".to_string()];

    let (summary, results) = run_collect(&registry, &feed_list(&feeds, "boom"), "x").await;

    assert_eq!(results, vec![SearchResult::new("Title", "ok")]);
    assert_eq!(summary.feeds, 2);
    assert_eq!(summary.completed_feeds, 1);
    assert_eq!(summary.failed_feeds.len(), 1);
    assert_eq!(summary.failed_feeds[0].feed, "boom");
    assert!(summary.failed_feeds[0].error.contains("worker error"));
}

#[tokio::test]
async fn unregistered_type_falls_back_to_default() {
    let registry = MatcherRegistry::new();
    let source = StaticFeedSource::new(vec![Feed::new("A", "http://a.test/feed", "atom")]);

    let (summary, results) = run_collect(&registry, &source, "x").await;
    assert!(results.is_empty());
    assert!(summary.failed_feeds.is_empty());
    assert_eq!(summary.completed_feeds, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn results_of_one_feed_keep_their_order() {
    let all = names(6);
    let mut registry = MatcherRegistry::new();
    registry
        .register("seq", Arc::new(SequenceMatcher::new(20, &[])))
        .expect("register");

    let (_, results) = run_collect(&registry, &feed_list(&all, "seq"), "x").await;
    assert_eq!(results.len(), 6 * 20);

    let mut per_feed: HashMap<&str, Vec<&str>> = HashMap::new();
    for result in &results {
        per_feed
            .entry(result.field.as_str())
            .or_default()
            .push(result.content.as_str());
    }
    for feed in &all {
        let expected: Vec<String> = (0..20).map(|i| format!("x #{i}")).collect();
        let seen: Vec<String> = per_feed[feed.as_str()].iter().map(|s| s.to_string()).collect();
        assert_eq!(seen, expected, "results of {feed} out of order");
    }
}

#[tokio::test]
async fn one_matcher_instance_serves_every_feed_of_its_type() {
    let matcher = Arc::new(SequenceMatcher::new(1, &[]));
    let mut registry = MatcherRegistry::new();
    registry
        .register("seq", Arc::clone(&matcher) as Arc<dyn Matcher>)
        .expect("register");

    let (_, results) = run_collect(&registry, &feed_list(&names(4), "seq"), "x").await;
    assert_eq!(results.len(), 4);
    assert_eq!(matcher.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn default_feed_scenario() {
    let registry = MatcherRegistry::new();
    let source = StaticFeedSource::new(vec![Feed::new("A", "http://a.test", "default")]);

    let (summary, results) = run_collect(&registry, &source, "x").await;
    assert!(results.is_empty());
    assert!(summary.is_complete());
}

#[test]
fn duplicate_rss_registration_scenario() {
    let config = SearchConfig::default();
    let mut registry = MatcherRegistry::new();
    rss::register(&mut registry, &config).expect("first registration");

    let err = rss::register(&mut registry, &config).unwrap_err();
    assert!(matches!(err, SearchError::AlreadyRegistered(ref tag) if tag == "rss"));
    assert!(err.to_string().contains("already registered"));
}

const FEED_A: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
<channel>
    <title>Feed A</title>
    <item>
        <title>x found</title>
        <description>nothing to see</description>
    </item>
    <item>
        <title>unrelated</title>
        <description>also unrelated</description>
    </item>
</channel>
</rss>"#;

#[tokio::test]
async fn rss_success_and_failure_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a.rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_A))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b.rss"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = SearchConfig::default();
    let mut registry = MatcherRegistry::new();
    rss::register(&mut registry, &config).expect("register");

    let source = StaticFeedSource::new(vec![
        Feed::new("A", format!("{}/a.rss", server.uri()), "rss"),
        Feed::new("B", format!("{}/b.rss", server.uri()), "rss"),
    ]);

    let (summary, results) = run_collect(&registry, &source, "x").await;

    assert_eq!(results, vec![SearchResult::new("Title", "x found")]);
    assert_eq!(summary.completed_feeds, 1);
    assert_eq!(summary.failed_feeds.len(), 1);
    assert_eq!(summary.failed_feeds[0].feed, "B");
    assert!(summary.failed_feeds[0].error.contains("HTTP"));
}

#[tokio::test]
async fn rss_malformed_document_counts_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken.rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops"))
        .mount(&server)
        .await;

    let config = SearchConfig::default();
    let mut registry = MatcherRegistry::new();
    rss::register(&mut registry, &config).expect("register");
    let source = StaticFeedSource::new(vec![Feed::new(
        "broken",
        format!("{}/broken.rss", server.uri()),
        "rss",
    )]);

    let (summary, results) = run_collect(&registry, &source, "x").await;
    assert!(results.is_empty());
    assert_eq!(summary.failed_feeds.len(), 1);
    assert!(summary.failed_feeds[0].error.contains("parse error"));
}
