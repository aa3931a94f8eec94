use crate::analysis::error::AnalysisError;
use crate::analysis::instructions::AnalysisInstructions;
use crate::backend::RunStatus;
use crate::logs::timestamp::{serialize_iso, serialize_iso_opt};
use crate::manifest::{EfficiencySummary, RunRecord, SkipCounts, TaskRecord};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const ANALYSIS_TYPE: &str = "manifest-based";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub include_instructions: bool,
    /// Fail the batch when nothing at all could be analyzed.
    pub strict: bool,
    pub manifest_page_size: u32,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            include_instructions: true,
            strict: false,
            manifest_page_size: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub runs: Vec<RunAnalysis>,
    pub summary: BatchSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_instructions: Option<&'static AnalysisInstructions>,

    /// Runs that were requested but not analyzed, in request order.
    #[serde(skip)]
    pub skipped: Vec<AnalysisError>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of runs requested, not the number analyzed.
    pub total_runs: usize,
    #[serde(serialize_with = "serialize_iso")]
    pub analysis_timestamp: DateTime<Utc>,
    pub analysis_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAnalysis {
    pub run_info: RunInfo,
    /// Serialized as `{}` when the manifest carried no run-level record.
    #[serde(serialize_with = "serialize_details_or_empty")]
    pub run_details: Option<RunRecord>,
    pub task_metrics: Vec<TaskRecord>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInfo {
    pub run_id: String,
    pub run_name: String,
    pub status: RunStatus,
    pub workflow_id: String,
    #[serde(serialize_with = "serialize_iso_opt")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_iso_opt")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_iso_opt")]
    pub stop_time: Option<DateTime<Utc>>,
    pub run_output_uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    #[serde(flatten)]
    pub efficiency: EfficiencySummary,
    pub manifest_log_count: usize,
    pub skipped_lines: SkipCounts,
}

fn serialize_details_or_empty<S>(
    details: &Option<RunRecord>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match details {
        Some(record) => record.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
