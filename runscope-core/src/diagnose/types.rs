use crate::backend::{RunStatus, TaskSummary};
use crate::logs::timestamp::{serialize_iso, serialize_iso_opt};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NO_FAILURE_REASON: &str = "No failure reason provided";
pub const NO_STATUS_MESSAGE: &str = "No status message";
pub const NO_RUN_UUID: &str = "No run UUID available - manifest logs cannot be retrieved";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnoseOptions {
    /// Most recent events taken from each engine, manifest and task stream.
    pub log_page_size: u32,
    pub task_page_size: u32,
    /// Per-task log fetches in flight at once; `1` is strictly sequential.
    pub task_log_concurrency: usize,
}

impl Default for DiagnoseOptions {
    fn default() -> Self {
        Self {
            log_page_size: 100,
            task_page_size: 100,
            task_log_concurrency: 1,
        }
    }
}

/// Outcome of a diagnosis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Diagnosis {
    /// The run has not failed; nothing beyond its metadata was fetched.
    NotFailed { status: RunStatus, message: String },
    Failed(Box<DiagnosisReport>),
}

impl Diagnosis {
    pub fn not_failed(status: RunStatus) -> Self {
        Diagnosis::NotFailed {
            status,
            message: format!(
                "Run is not in FAILED state. Current status: {}",
                status.as_str()
            ),
        }
    }

    pub fn report(&self) -> Option<&DiagnosisReport> {
        match self {
            Diagnosis::Failed(report) => Some(report),
            Diagnosis::NotFailed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisReport {
    pub run_id: String,
    pub run_uuid: Option<String>,
    pub status: RunStatus,
    pub failure_reason: String,
    pub timestamps: RunTimestamps,
    pub workflow_id: String,
    pub workflow_type: Option<String>,
    pub engine_logs: Vec<String>,
    pub engine_log_count: usize,
    pub manifest_logs: Vec<String>,
    pub manifest_log_count: usize,
    pub failed_tasks: Vec<FailedTaskReport>,
    pub failed_task_count: usize,
    pub recommendations: Vec<String>,
    pub summary: DiagnosisSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTimestamps {
    #[serde(serialize_with = "serialize_iso_opt")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_iso_opt")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_iso_opt")]
    pub stop_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedTaskReport {
    pub task_id: String,
    pub name: String,
    pub status_message: String,
    pub logs: Vec<String>,
    pub log_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisSummary {
    pub total_failed_tasks: usize,
    pub has_manifest_logs: bool,
    pub has_engine_logs: bool,
    #[serde(serialize_with = "serialize_iso")]
    pub diagnosis_timestamp: DateTime<Utc>,
}

/// First page of a run's failed tasks, without their logs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedTaskPreview {
    pub run_id: String,
    pub tasks: Vec<TaskSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

//-----------------------------------------------------------------------------
// Log collection outcome
//-----------------------------------------------------------------------------

/// What one log source contributed to a report.
///
/// Fetch failures and absent sources still render as a single line, so the
/// report shape stays uniform, but they never count as real log data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CollectedLogs {
    Fetched(Vec<String>),
    Failed(String),
    Unavailable(&'static str),
}

impl CollectedLogs {
    pub(crate) fn has_entries(&self) -> bool {
        matches!(self, CollectedLogs::Fetched(lines) if !lines.is_empty())
    }

    pub(crate) fn into_lines(self) -> Vec<String> {
        match self {
            CollectedLogs::Fetched(lines) => lines,
            CollectedLogs::Failed(message) => vec![message],
            CollectedLogs::Unavailable(sentinel) => vec![sentinel.to_string()],
        }
    }
}
