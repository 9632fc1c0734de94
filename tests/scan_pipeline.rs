// Pipeline tests driven by in-memory fetchers: classification, accounting,
// fault isolation and the concurrency bound.

use async_trait::async_trait;
use bundle_recon::core::models::{AnalysisOutcome, Finding, ResultAggregate};
use bundle_recon::core::patterns::{Matcher, PatternSet};
use bundle_recon::core::scanner::analyzer::DomainAnalyzer;
use bundle_recon::core::scanner::coordinator::ScanCoordinator;
use bundle_recon::core::scanner::fetcher::PageFetcher;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Serves fixed bodies by URL; unknown URLs behave like unreachable hosts.
#[derive(Default)]
struct StaticFetcher {
    pages: HashMap<String, String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl StaticFetcher {
    fn with(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Registers a landing page referencing `/static/main.js` and that bundle.
    fn site(self, domain: &str, bundle: &str) -> Self {
        self.with(
            &format!("https://{domain}/"),
            r#"<html><script src="/static/main.abcd123.js"></script></html>"#,
        )
        .with(&format!("https://{domain}/static/main.abcd123.js"), bundle)
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.pages.get(url).cloned()
    }
}

fn coordinator(fetcher: StaticFetcher, patterns: PatternSet, concurrency: usize) -> (ScanCoordinator<StaticFetcher>, Arc<StaticFetcher>) {
    let fetcher = Arc::new(fetcher);
    let analyzer = DomainAnalyzer::new(Arc::clone(&fetcher), patterns);
    (ScanCoordinator::new(analyzer, concurrency), fetcher)
}

fn domains(list: &[&str]) -> Vec<String> {
    list.iter().map(|d| d.to_string()).collect()
}

fn found_set(aggregate: &ResultAggregate, pattern: &str) -> BTreeSet<(String, String)> {
    aggregate.per_pattern[pattern]
        .found
        .iter()
        .map(|f| (f.domain.clone(), f.value.clone()))
        .collect()
}

fn as_set(items: &[String]) -> BTreeSet<String> {
    items.iter().cloned().collect()
}

#[tokio::test]
async fn bundle_with_auth_domain_is_found() {
    let fetcher = StaticFetcher::default()
        .site("tenant.test", r#"const firebaseConfig = { authDomain: "tenant.example.com" };"#);
    let analyzer = DomainAnalyzer::new(Arc::new(fetcher), PatternSet::defaults());

    let outcome = analyzer.analyze("tenant.test").await;
    assert_eq!(
        outcome,
        AnalysisOutcome::Processed(vec![("authDomain".to_string(), Some("tenant.example.com".to_string()))])
    );
}

#[tokio::test]
async fn bundle_without_pattern_is_processed_but_not_found() {
    let fetcher = StaticFetcher::default().site("plain.test", "console.log('hello');");
    let analyzer = DomainAnalyzer::new(Arc::new(fetcher), PatternSet::defaults());

    assert_eq!(
        analyzer.analyze("plain.test").await,
        AnalysisOutcome::Processed(vec![("authDomain".to_string(), None)])
    );
}

#[tokio::test]
async fn unreachable_page_is_skipped() {
    let analyzer = DomainAnalyzer::new(Arc::new(StaticFetcher::default()), PatternSet::defaults());
    assert!(analyzer.analyze("gone.test").await.is_skipped());
}

#[tokio::test]
async fn page_without_main_bundle_is_skipped() {
    let fetcher = StaticFetcher::default()
        .with("https://static.test/", r#"<script src="/vendor.js"></script>"#)
        .with("https://static.test/vendor.js", r#"authDomain: "never.read""#);
    let fetcher = Arc::new(fetcher);
    let analyzer = DomainAnalyzer::new(Arc::clone(&fetcher), PatternSet::defaults());

    assert!(analyzer.analyze("static.test").await.is_skipped());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unreachable_bundle_is_skipped() {
    let fetcher = StaticFetcher::default()
        .with("https://broken.test/", r#"<script src="js/main.js"></script>"#);
    let analyzer = DomainAnalyzer::new(Arc::new(fetcher), PatternSet::defaults());
    assert!(analyzer.analyze("broken.test").await.is_skipped());
}

#[tokio::test]
async fn every_domain_contributes_once_per_pattern() {
    let patterns = PatternSet::from_definitions([
        r#"authDomain=authDomain\s*:\s*"([^"]+)""#,
        r#"apiKey=apiKey\s*:\s*"([^"]+)""#,
    ])
    .unwrap();
    let fetcher = StaticFetcher::default()
        .site("both.test", r#"{authDomain: "both.firebaseapp.com", apiKey: "AIza1"}"#)
        .site("auth.test", r#"{authDomain: "auth.firebaseapp.com"}"#)
        .site("none.test", "{}")
        .with("https://nobundle.test/", "<html></html>");
    let (coordinator, _) = coordinator(fetcher, patterns, 3);

    let input = domains(&["both.test", "auth.test", "none.test", "nobundle.test", "down.test", "auth.test"]);
    let aggregate = coordinator.scan(&input).await;

    for pattern in ["authDomain", "apiKey"] {
        assert_eq!(aggregate.contributions(pattern), input.len(), "pattern {pattern}");
    }
    assert_eq!(as_set(&aggregate.skipped), as_set(&domains(&["nobundle.test", "down.test"])));

    let auth = &aggregate.per_pattern["authDomain"];
    assert_eq!(auth.found.len(), 3);
    assert!(auth.found.contains(&Finding { domain: "auth.test".into(), value: "auth.firebaseapp.com".into() }));
    assert_eq!(auth.not_found, vec!["none.test".to_string()]);

    let api = &aggregate.per_pattern["apiKey"];
    assert_eq!(found_set(&aggregate, "apiKey"), BTreeSet::from([("both.test".to_string(), "AIza1".to_string())]));
    assert_eq!(api.not_found.len(), 3);
}

#[tokio::test]
async fn domains_are_normalized_before_analysis() {
    let fetcher = StaticFetcher::default().site("tenant.test", r#"authDomain: "t.example.com""#);
    let (coordinator, _) = coordinator(fetcher, PatternSet::defaults(), 2);

    let aggregate = coordinator.scan(&domains(&["  tenant.test/ "])).await;
    assert_eq!(
        found_set(&aggregate, "authDomain"),
        BTreeSet::from([("tenant.test".to_string(), "t.example.com".to_string())])
    );
}

#[tokio::test]
async fn repeated_scans_classify_identically() {
    let build = || {
        StaticFetcher::default()
            .site("a.test", r#"authDomain: "a.example.com""#)
            .site("b.test", "nothing")
            .delayed(Duration::from_millis(2))
    };
    let input = domains(&["a.test", "b.test", "c.test", "a.test"]);

    let (first, _) = coordinator(build(), PatternSet::defaults(), 4);
    let (second, _) = coordinator(build(), PatternSet::defaults(), 2);
    let first = first.scan(&input).await;
    let second = second.scan(&input).await;

    assert_eq!(found_set(&first, "authDomain"), found_set(&second, "authDomain"));
    assert_eq!(
        as_set(&first.per_pattern["authDomain"].not_found),
        as_set(&second.per_pattern["authDomain"].not_found)
    );
    assert_eq!(as_set(&first.skipped), as_set(&second.skipped));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrency_bound_is_respected() {
    let mut fetcher = StaticFetcher::default().delayed(Duration::from_millis(10));
    let mut input = Vec::new();
    for i in 0..40 {
        let domain = format!("site{i}.test");
        fetcher = fetcher.site(&domain, r#"authDomain: "x.example.com""#);
        input.push(domain);
    }
    let (coordinator, fetcher) = coordinator(fetcher, PatternSet::defaults(), 3);

    let mut reports = 0;
    let aggregate = coordinator
        .scan_with_progress(&input, |progress| {
            reports += 1;
            assert_eq!(progress.completed, reports);
            assert_eq!(progress.total, 40);
        })
        .await;

    assert_eq!(reports, 40);
    assert_eq!(aggregate.per_pattern["authDomain"].found.len(), 40);
    let peak = fetcher.max_in_flight.load(Ordering::SeqCst);
    assert_eq!(coordinator.concurrency(), 3);
    assert!(peak <= coordinator.concurrency(), "peak in-flight fetches was {peak}");
    assert!(peak >= 2, "analyses never overlapped (peak {peak})");
}

/// Panics on bundles containing "boom", reports "token" otherwise.
struct Fragile;

impl Matcher for Fragile {
    fn find(&self, text: &str) -> Option<String> {
        if text.contains("boom") {
            panic!("matcher blew up");
        }
        text.contains("token").then(|| "token".to_string())
    }
}

#[tokio::test]
async fn analyzer_turns_matcher_panic_into_skip() {
    let mut patterns = PatternSet::new();
    patterns.insert("fragile", Fragile).unwrap();
    let fetcher = StaticFetcher::default()
        .with("https://x.test/", r#"<script src="/main.js"></script>"#)
        .with("https://x.test/main.js", "boom")
        .site("ok.test", "token");
    let analyzer = DomainAnalyzer::new(Arc::new(fetcher), patterns);

    assert_eq!(analyzer.analyze("x.test").await, AnalysisOutcome::Skipped);
    assert_eq!(
        analyzer.analyze("ok.test").await,
        AnalysisOutcome::Processed(vec![("fragile".to_string(), Some("token".to_string()))])
    );
}

#[tokio::test]
async fn panicking_matcher_only_skips_its_domain() {
    let mut patterns = PatternSet::new();
    patterns.insert("fragile", Fragile).unwrap();
    let fetcher = StaticFetcher::default()
        .site("bad.test", "boom")
        .site("good.test", "token");
    let (coordinator, _) = coordinator(fetcher, patterns, 2);

    let aggregate = coordinator.scan(&domains(&["bad.test", "good.test"])).await;
    assert_eq!(aggregate.skipped, vec!["bad.test".to_string()]);
    assert_eq!(found_set(&aggregate, "fragile"), BTreeSet::from([("good.test".to_string(), "token".to_string())]));
}

#[tokio::test]
async fn progress_reports_running_found_counts() {
    let fetcher = StaticFetcher::default()
        .site("a.test", r#"authDomain: "a.example.com""#)
        .site("b.test", r#"authDomain: "b.example.com""#);
    let (coordinator, _) = coordinator(fetcher, PatternSet::defaults(), 1);

    let mut last = None;
    coordinator
        .scan_with_progress(&domains(&["a.test", "b.test", "c.test"]), |progress| {
            last = Some(progress.clone());
        })
        .await;

    let last = last.unwrap();
    assert_eq!(last.completed, 3);
    assert_eq!(last.skipped, 1);
    assert_eq!(last.found, vec![("authDomain".to_string(), 2)]);
    assert_eq!(last.ratio(), 1.0);
}

#[tokio::test]
async fn zero_concurrency_still_scans_one_at_a_time() {
    let fetcher = StaticFetcher::default()
        .site("a.test", r#"authDomain: "a.example.com""#)
        .site("b.test", r#"authDomain: "b.example.com""#)
        .delayed(Duration::from_millis(2));
    let (coordinator, fetcher) = coordinator(fetcher, PatternSet::defaults(), 0);
    assert_eq!(coordinator.concurrency(), 1);

    let aggregate = coordinator.scan(&domains(&["a.test", "b.test"])).await;
    assert_eq!(aggregate.per_pattern["authDomain"].found.len(), 2);
    assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_domain_list_yields_empty_aggregate() {
    let (coordinator, _) = coordinator(StaticFetcher::default(), PatternSet::defaults(), 4);
    let aggregate = coordinator.scan(&[]).await;
    assert!(aggregate.skipped.is_empty());
    assert_eq!(aggregate.contributions("authDomain"), 0);
}
