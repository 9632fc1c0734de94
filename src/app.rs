// src/app.rs

use bundle_recon::core::models::{ResultAggregate, ScanProgress};

pub enum AppState {
    Scanning,
    Finished,
}

/// Per-pattern totals shown once the scan is over.
#[derive(Debug, Default)]
pub struct PatternSummary {
    pub name: String,
    pub found: usize,
    pub not_found: usize,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub patterns: Vec<PatternSummary>,
    pub ignored: usize,
}

impl ScanSummary {
    pub fn from_aggregate(aggregate: &ResultAggregate) -> Self {
        Self {
            patterns: aggregate
                .buckets()
                .map(|(name, bucket)| PatternSummary {
                    name: name.to_string(),
                    found: bucket.found.len(),
                    not_found: bucket.not_found.len(),
                })
                .collect(),
            ignored: aggregate.skipped.len(),
        }
    }
}

/// State rendered by the progress view.
pub struct App {
    pub state: AppState,
    pub progress: ScanProgress,
    pub summary: ScanSummary,
}

impl App {
    pub fn new(total: usize, pattern_names: Vec<String>) -> Self {
        Self {
            state: AppState::Scanning,
            progress: ScanProgress {
                total,
                found: pattern_names.into_iter().map(|name| (name, 0)).collect(),
                ..Default::default()
            },
            summary: ScanSummary::default(),
        }
    }

    pub fn update(&mut self, progress: &ScanProgress) {
        self.progress = progress.clone();
    }

    pub fn finish(&mut self, aggregate: &ResultAggregate) {
        self.summary = ScanSummary::from_aggregate(aggregate);
        self.state = AppState::Finished;
    }
}
