// src/core/scanner/coordinator.rs

use crate::core::models::{AnalysisOutcome, ResultAggregate, ScanProgress, normalize_domain};
use crate::core::scanner::analyzer::DomainAnalyzer;
use crate::core::scanner::fetcher::PageFetcher;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// Default number of domains analyzed at the same time.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Drives a [`DomainAnalyzer`] over a domain list with bounded parallelism.
///
/// Each domain runs in its own tokio task, but tasks are only spawned as pool
/// slots free up, so at most `concurrency` analyses are in flight. Outcomes are
/// harvested one at a time in completion order; this harvest loop is the only
/// place the [`ResultAggregate`] is written.
pub struct ScanCoordinator<F: ?Sized> {
    analyzer: DomainAnalyzer<F>,
    concurrency: usize,
}

impl<F: PageFetcher + ?Sized + 'static> ScanCoordinator<F> {
    pub fn new(analyzer: DomainAnalyzer<F>, concurrency: usize) -> Self {
        Self { analyzer, concurrency: concurrency.max(1) }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub async fn scan(&self, domains: &[String]) -> ResultAggregate {
        self.scan_with_progress(domains, |_| {}).await
    }

    /// Scans every domain, calling `on_progress` after each merged outcome.
    ///
    /// Returns only once every domain has contributed exactly once.
    pub async fn scan_with_progress<P>(&self, domains: &[String], mut on_progress: P) -> ResultAggregate
    where
        P: FnMut(&ScanProgress),
    {
        let mut aggregate = ResultAggregate::new(self.analyzer.patterns().names());
        let mut progress = ScanProgress {
            total: domains.len(),
            found: aggregate.found_counts(),
            ..Default::default()
        };
        info!(domains = domains.len(), concurrency = self.concurrency, "Starting scan.");

        let mut outcomes = stream::iter(domains.iter().map(|raw| normalize_domain(raw)))
            .map(|domain| {
                let analyzer = self.analyzer.clone();
                async move {
                    let target = domain.clone();
                    let task = tokio::spawn(async move { analyzer.analyze(&target).await });
                    let outcome = match task.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            warn!(domain = %domain, error = %e, "Analysis task failed.");
                            AnalysisOutcome::Skipped
                        }
                    };
                    (domain, outcome)
                }
            })
            .buffer_unordered(self.concurrency);

        while let Some((domain, outcome)) = outcomes.next().await {
            aggregate.merge(&domain, outcome);
            progress.completed += 1;
            progress.skipped = aggregate.skipped.len();
            progress.found = aggregate.found_counts();
            on_progress(&progress);
        }

        info!(
            completed = progress.completed,
            skipped = progress.skipped,
            found = ?progress.found,
            "Scan finished."
        );
        aggregate
    }
}
