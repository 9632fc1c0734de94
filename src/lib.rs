// src/lib.rs

// Bulk recon over a domain list: fetch each landing page, follow its
// `main*.js` bundle and pull configured identifiers out of the bundle text.

pub mod core;
pub mod output;

pub use crate::core::error::ReconError;
pub use crate::core::models::{AnalysisOutcome, ResultAggregate, ScanProgress};
pub use crate::core::patterns::{Matcher, PatternSet};
pub use crate::core::scanner::{ScanSettings, run_scan};
