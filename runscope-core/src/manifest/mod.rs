//! Manifest Record Classifier & Metrics Extractor
//!
//! A manifest stream interleaves plain text with one JSON summary per run
//! and per task. Lines are classified by field presence into a
//! [`ManifestRecord`]; task records carry [`DerivedEfficiency`] computed
//! against fixed policy thresholds, and [`aggregate`] rolls them up per run.
//!
//! raw line
//! parse_line  -> Result<ManifestRecord, SkipReason>
//! scan_manifest -> ManifestScan { run_details, tasks, skipped }
//! aggregate   -> EfficiencySummary
//!

mod aggregate;
mod efficiency;
mod parse;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{EfficiencySummary, ManifestScan, SkipCounts, aggregate, scan_manifest};
pub use efficiency::{
    DerivedEfficiency, OVER_PROVISIONED_THRESHOLD, TARGET_EFFICIENCY, UNDER_PROVISIONED_THRESHOLD,
    compute_efficiency, ratio,
};
pub use parse::{SkipReason, classify, parse_line};
pub use types::{ManifestRecord, RunRecord, TaskRecord};
