//! Run Diagnostic Aggregator
//!
//! run lookup (fatal)
//! -> not FAILED? early exit with status only
//! -> engine logs, manifest logs (recovered)
//! -> every page of FAILED tasks (fatal), logs per task (recovered)
//! -> DiagnosisReport
//!

mod aggregator;
mod error;
mod preview;
mod recommendations;
mod types;

#[cfg(test)]
mod tests;

pub use aggregator::diagnose;
pub use error::DiagnoseError;
pub use preview::{DEFAULT_PREVIEW_LIMIT, preview_failed_tasks};
pub use recommendations::{RECOMMENDATIONS, recommendations};
pub use types::{
    DiagnoseOptions, Diagnosis, DiagnosisReport, DiagnosisSummary, FailedTaskPreview,
    FailedTaskReport, NO_FAILURE_REASON, NO_RUN_UUID, NO_STATUS_MESSAGE, RunTimestamps,
};
