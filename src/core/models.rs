// src/core/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

// --- Domain ---

/// Normalizes a raw domain entry: surrounding whitespace and trailing slashes are dropped.
pub fn normalize_domain(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Builds the landing page URL for a normalized domain.
pub fn base_url(domain: &str) -> String {
    format!("https://{}/", domain)
}

// --- Per-domain outcome ---

/// One matcher result per configured pattern, in pattern order.
/// `None` means the pattern was absent from the asset text.
pub type PatternMatches = Vec<(String, Option<String>)>;

/// Result of analyzing a single domain.
///
/// Every failure mode (unreachable page, missing bundle reference, unreachable
/// bundle, panicked task) is folded into `Skipped`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Skipped,
    Processed(PatternMatches),
}

impl AnalysisOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, AnalysisOutcome::Skipped)
    }
}

// --- Aggregate ---

/// A domain paired with the value its bundle exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub domain: String,
    pub value: String,
}

/// Found / not-found partition for one pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternBucket {
    pub found: Vec<Finding>,
    pub not_found: Vec<String>,
}

/// The final classification of a scan.
///
/// Created empty with one bucket per pattern, filled outcome by outcome by the
/// coordinator and then handed out read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultAggregate {
    /// Pattern names in configuration order.
    pub pattern_order: Vec<String>,
    pub per_pattern: BTreeMap<String, PatternBucket>,
    pub skipped: Vec<String>,
}

impl ResultAggregate {
    pub fn new<I, S>(pattern_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pattern_order: Vec<String> = pattern_names.into_iter().map(Into::into).collect();
        let per_pattern = pattern_order
            .iter()
            .map(|name| (name.clone(), PatternBucket::default()))
            .collect();
        Self { pattern_order, per_pattern, skipped: Vec::new() }
    }

    /// Folds one domain's outcome into the aggregate.
    pub fn merge(&mut self, domain: &str, outcome: AnalysisOutcome) {
        match outcome {
            AnalysisOutcome::Skipped => self.skipped.push(domain.to_string()),
            AnalysisOutcome::Processed(matches) => {
                for (name, value) in matches {
                    // Buckets exist only for configured patterns.
                    let Some(bucket) = self.per_pattern.get_mut(&name) else {
                        warn!(domain, pattern = %name, "Match for unconfigured pattern dropped.");
                        continue;
                    };
                    match value {
                        Some(value) => bucket.found.push(Finding { domain: domain.to_string(), value }),
                        None => bucket.not_found.push(domain.to_string()),
                    }
                }
            }
        }
    }

    /// Buckets in configuration order.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &PatternBucket)> {
        self.pattern_order
            .iter()
            .filter_map(|name| self.per_pattern.get(name).map(|bucket| (name.as_str(), bucket)))
    }

    pub fn found_counts(&self) -> Vec<(String, usize)> {
        self.buckets().map(|(name, bucket)| (name.to_string(), bucket.found.len())).collect()
    }

    /// Number of domains accounted for under `pattern` (found + not found + skipped).
    pub fn contributions(&self, pattern: &str) -> usize {
        let classified = self
            .per_pattern
            .get(pattern)
            .map(|bucket| bucket.found.len() + bucket.not_found.len())
            .unwrap_or(0);
        classified + self.skipped.len()
    }
}

// --- Progress ---

/// Snapshot handed to the progress callback after every merge.
#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    pub total: usize,
    pub completed: usize,
    pub skipped: usize,
    pub found: Vec<(String, usize)>,
}

impl ScanProgress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.completed as f64 / self.total as f64).clamp(0.0, 1.0)
        }
    }
}
