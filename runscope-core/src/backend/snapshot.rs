use crate::backend::types::{RawLogEvent, RunDetails, TaskSummary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read telemetry snapshot {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse telemetry snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A captured copy of run metadata, task listings and log streams.
///
/// Streams are keyed by stream name (for example `run/1234/engine`); the log
/// group is not part of the key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    #[serde(default)]
    pub runs: Vec<RunDetails>,
    #[serde(default)]
    pub tasks: HashMap<String, Vec<TaskSummary>>,
    #[serde(default)]
    pub streams: HashMap<String, Vec<RawLogEvent>>,
}

impl TelemetrySnapshot {
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|e| SnapshotError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&raw).map_err(|e| SnapshotError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn with_run(mut self, run: RunDetails) -> Self {
        self.runs.push(run);
        self
    }

    pub fn with_tasks(mut self, run_id: impl Into<String>, tasks: Vec<TaskSummary>) -> Self {
        self.tasks.entry(run_id.into()).or_default().extend(tasks);
        self
    }

    pub fn with_stream(mut self, stream: impl Into<String>, events: Vec<RawLogEvent>) -> Self {
        self.streams.insert(stream.into(), events);
        self
    }
}
