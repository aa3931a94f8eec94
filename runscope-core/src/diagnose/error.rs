use crate::backend::BackendError;
use thiserror::Error;

/// Faults that abort a diagnosis. Everything else is recorded in the report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiagnoseError {
    #[error("failed to look up run {run_id}: {source}")]
    RunLookup {
        run_id: String,
        #[source]
        source: BackendError,
    },

    #[error("failed to enumerate failed tasks for run {run_id}: {source}")]
    TaskEnumeration {
        run_id: String,
        #[source]
        source: BackendError,
    },
}

impl DiagnoseError {
    pub fn run_id(&self) -> &str {
        match self {
            DiagnoseError::RunLookup { run_id, .. } => run_id,
            DiagnoseError::TaskEnumeration { run_id, .. } => run_id,
        }
    }
}
