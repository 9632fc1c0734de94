// src/core/scanner/analyzer.rs

use crate::core::models::{AnalysisOutcome, base_url};
use crate::core::patterns::PatternSet;
use crate::core::scanner::fetcher::PageFetcher;
use crate::core::scanner::locator;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs the page → bundle → patterns sequence for one domain at a time.
pub struct DomainAnalyzer<F: ?Sized> {
    fetcher: Arc<F>,
    patterns: PatternSet,
}

impl<F: ?Sized> Clone for DomainAnalyzer<F> {
    fn clone(&self) -> Self {
        Self { fetcher: Arc::clone(&self.fetcher), patterns: self.patterns.clone() }
    }
}

impl<F: PageFetcher + ?Sized> DomainAnalyzer<F> {
    pub fn new(fetcher: Arc<F>, patterns: PatternSet) -> Self {
        Self { fetcher, patterns }
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Analyzes a normalized domain. Never fails: any missing stage, and any
    /// panic raised while fetching or matching, yields `Skipped`.
    pub async fn analyze(&self, domain: &str) -> AnalysisOutcome {
        AssertUnwindSafe(self.run(domain))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                warn!(domain, "Analysis panicked, domain skipped.");
                AnalysisOutcome::Skipped
            })
    }

    async fn run(&self, domain: &str) -> AnalysisOutcome {
        let base = base_url(domain);

        let Some(html) = self.fetcher.fetch(&base).await else {
            debug!(domain, "Landing page unavailable.");
            return AnalysisOutcome::Skipped;
        };

        let Some(bundle_url) = locator::locate(&html, &base) else {
            debug!(domain, "No main bundle referenced.");
            return AnalysisOutcome::Skipped;
        };

        let Some(bundle) = self.fetcher.fetch(&bundle_url).await else {
            debug!(domain, bundle_url = %bundle_url, "Bundle unavailable.");
            return AnalysisOutcome::Skipped;
        };

        let matches = self.patterns.apply(&bundle);
        debug!(
            domain,
            bundle_url = %bundle_url,
            hits = matches.iter().filter(|(_, value)| value.is_some()).count(),
            "Bundle analyzed."
        );
        AnalysisOutcome::Processed(matches)
    }
}
