// src/core/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Setup and output failures. Per-domain scan failures never surface here;
/// they become `AnalysisOutcome::Skipped`.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("pattern definition `{0}` must look like NAME=REGEX")]
    MalformedPattern(String),

    #[error("pattern name `{0}` is empty or not usable as a file name")]
    InvalidPatternName(String),

    #[error("pattern `{0}` is defined more than once")]
    DuplicatePattern(String),

    #[error("pattern `{name}` does not compile: {source}")]
    InvalidRegex {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern `{name}` must have exactly one capture group, found {found}")]
    CaptureGroups { name: String, found: usize },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}
