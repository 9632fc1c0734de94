// src/core/scanner/mod.rs

// Public interface of the scanning pipeline, leaf-first.
pub mod fetcher;
pub mod locator;
pub mod analyzer;
pub mod coordinator;

use crate::core::error::ReconError;
use crate::core::models::{ResultAggregate, ScanProgress};
use crate::core::patterns::PatternSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use self::analyzer::DomainAnalyzer;
use self::coordinator::{DEFAULT_CONCURRENCY, ScanCoordinator};
use self::fetcher::{DEFAULT_USER_AGENT, HttpFetcher};

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 7;

/// Knobs for a network scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScanSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builds the HTTP-backed pipeline for `settings` and `patterns`.
pub fn http_coordinator(
    settings: &ScanSettings,
    patterns: PatternSet,
) -> Result<ScanCoordinator<HttpFetcher>, ReconError> {
    let fetcher = HttpFetcher::new(settings.timeout(), &settings.user_agent)?;
    let analyzer = DomainAnalyzer::new(Arc::new(fetcher), patterns);
    Ok(ScanCoordinator::new(analyzer, settings.concurrency))
}

/// Scans `domains` over HTTPS and returns the aggregated classification.
///
/// This is the main entry point of the library: it wires an [`HttpFetcher`]
/// into a [`DomainAnalyzer`] and drives it through a [`ScanCoordinator`].
pub async fn run_scan<P>(
    domains: &[String],
    patterns: PatternSet,
    settings: &ScanSettings,
    on_progress: P,
) -> Result<ResultAggregate, ReconError>
where
    P: FnMut(&ScanProgress),
{
    let coordinator = http_coordinator(settings, patterns)?;
    Ok(coordinator.scan_with_progress(domains, on_progress).await)
}
