// src/core/mod.rs

// The `core` module holds everything that does not touch the terminal:
// the data model, the pattern catalogue and the scanning pipeline.

/// Data structures shared across the pipeline, such as `AnalysisOutcome`
/// and `ResultAggregate`.
pub mod models;

/// Named extraction patterns and the `Matcher` capability.
pub mod patterns;

/// Fetching, bundle location, per-domain analysis and the bounded scan pool.
pub mod scanner;

/// Error type for setup and output failures.
pub mod error;
