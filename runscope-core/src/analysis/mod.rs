//! Multi-Run Analysis Report Builder
//!
//! For every requested run: look the run up, read its whole manifest stream,
//! classify and aggregate it into a [`RunAnalysis`]. Runs that cannot be
//! analyzed drop out of the report; `summary.totalRuns` still counts them.

mod builder;
mod error;
mod instructions;
mod prompt;
mod run_ids;
mod types;


pub use builder::analyze;
pub use error::AnalysisError;
pub use instructions::{
    AnalysisInstructions, FocusArea, MetricReference, Thresholds, analysis_instructions,
};
pub use prompt::render_analysis_prompt;
pub use run_ids::normalize_run_ids;
pub use types::{
    ANALYSIS_TYPE, AnalysisReport, AnalyzeOptions, BatchSummary, RunAnalysis, RunInfo, RunSummary,
};
