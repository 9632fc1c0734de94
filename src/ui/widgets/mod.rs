// src/ui/widgets/mod.rs

pub mod footer;   // Status line under the counts.
pub mod progress; // Completed / total gauge.
pub mod summary;  // Per-pattern counts.
