use crate::backend::BackendError;
use crate::logs::LogReadError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    // Per run; the batch carries on without it.
    #[error("failed to look up run {run_id}: {source}")]
    RunLookup {
        run_id: String,
        #[source]
        source: BackendError,
    },

    #[error("run {run_id} has no uuid, manifest cannot be located")]
    MissingRunUuid { run_id: String },

    #[error("failed to read manifest for run {run_id}: {source}")]
    ManifestRead {
        run_id: String,
        #[source]
        source: LogReadError,
    },

    #[error("no manifest events found for run {run_id}")]
    EmptyManifest { run_id: String },

    // Batch
    #[error("none of the {requested} requested runs could be analyzed")]
    NoRunsAnalyzed { requested: usize },
}

impl AnalysisError {
    pub fn run_id(&self) -> Option<&str> {
        match self {
            AnalysisError::RunLookup { run_id, .. }
            | AnalysisError::MissingRunUuid { run_id }
            | AnalysisError::ManifestRead { run_id, .. }
            | AnalysisError::EmptyManifest { run_id } => Some(run_id),
            AnalysisError::NoRunsAnalyzed { .. } => None,
        }
    }
}
