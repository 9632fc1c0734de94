// src/output.rs

use crate::core::error::ReconError;
use crate::core::models::{Finding, ResultAggregate};
use crate::core::scanner::ScanSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File collecting domains that were skipped.
pub const IGNORED_FILE: &str = "ignored.txt";

pub fn found_file_name(pattern: &str) -> String {
    format!("{}_found.txt", pattern)
}

pub fn not_found_file_name(pattern: &str) -> String {
    format!("{}_not_found.txt", pattern)
}

fn write_lines<I, S>(path: PathBuf, lines: I) -> Result<PathBuf, ReconError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let body = lines.into_iter().map(|l| l.as_ref().to_string()).collect::<Vec<_>>().join("\n");
    fs::write(&path, body).map_err(|source| ReconError::Write { path: path.clone(), source })?;
    Ok(path)
}

/// Writes `<pattern>_found.txt` / `<pattern>_not_found.txt` per pattern plus
/// `ignored.txt` into `dir`. Returns the written paths in that order.
pub fn write_results(aggregate: &ResultAggregate, dir: &Path) -> Result<Vec<PathBuf>, ReconError> {
    fs::create_dir_all(dir).map_err(|source| ReconError::Write { path: dir.to_path_buf(), source })?;

    let mut written = Vec::new();
    for (name, bucket) in aggregate.buckets() {
        written.push(write_lines(
            dir.join(found_file_name(name)),
            bucket.found.iter().map(|f| format!("{}: {}", f.domain, f.value)),
        )?);
        written.push(write_lines(dir.join(not_found_file_name(name)), &bucket.not_found)?);
    }
    written.push(write_lines(dir.join(IGNORED_FILE), &aggregate.skipped)?);

    info!(files = written.len(), dir = %dir.display(), "Result files written.");
    Ok(written)
}

/// Per-pattern section of the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternReport {
    pub name: String,
    pub found_count: usize,
    pub not_found_count: usize,
    pub found: Vec<Finding>,
    pub not_found: Vec<String>,
}

/// Machine-readable export of a finished scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub settings: ScanSettings,
    pub domains: usize,
    pub patterns: Vec<PatternReport>,
    pub skipped: Vec<String>,
}

impl ScanReport {
    pub fn new(
        aggregate: &ResultAggregate,
        settings: &ScanSettings,
        domains: usize,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let patterns = aggregate
            .buckets()
            .map(|(name, bucket)| PatternReport {
                name: name.to_string(),
                found_count: bucket.found.len(),
                not_found_count: bucket.not_found.len(),
                found: bucket.found.clone(),
                not_found: bucket.not_found.clone(),
            })
            .collect();
        Self {
            started_at,
            finished_at,
            settings: settings.clone(),
            domains,
            patterns,
            skipped: aggregate.skipped.clone(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), ReconError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| ReconError::Write { path: parent.to_path_buf(), source })?;
        }
        fs::write(path, json).map_err(|source| ReconError::Write { path: path.to_path_buf(), source })?;
        info!(path = %path.display(), "JSON report written.");
        Ok(())
    }
}
