use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Pending,
    Starting,
    Running,
    Stopping,
    Completed,
    Deleted,
    Cancelled,
    Failed,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Pending => "PENDING",
            RunStatus::Starting => "STARTING",
            RunStatus::Running => "RUNNING",
            RunStatus::Stopping => "STOPPING",
            RunStatus::Completed => "COMPLETED",
            RunStatus::Deleted => "DELETED",
            RunStatus::Cancelled => "CANCELLED",
            RunStatus::Failed => "FAILED",
        }
    }

    pub fn is_failed(self) -> bool {
        matches!(self, RunStatus::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Starting,
    Running,
    Stopping,
    Completed,
    Cancelled,
    Failed,
}

/// Run metadata as reported by the run metadata source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDetails {
    pub id: String,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub name: String,
    pub status: RunStatus,
    #[serde(default)]
    pub workflow_id: String,
    #[serde(default)]
    pub workflow_type: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    /// Correlation identifier used to locate the run's manifest stream.
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stop_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub output_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub task_id: String,
    #[serde(default)]
    pub name: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskPage {
    pub items: Vec<TaskSummary>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListTasksRequest {
    pub run_id: String,
    pub status: Option<TaskStatus>,
    pub max_results: u32,
    pub starting_token: Option<String>,
}

/// Request for one page of a named log stream, in the backend's native
/// epoch-millisecond convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEventsRequest {
    pub log_group: String,
    pub log_stream: String,
    pub start_time_ms: Option<i64>,
    pub end_time_ms: Option<i64>,
    pub limit: u32,
    pub next_token: Option<String>,
    pub start_from_head: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLogEvent {
    pub timestamp: i64,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RawLogPage {
    pub events: Vec<RawLogEvent>,
    pub next_forward_token: Option<String>,
}
