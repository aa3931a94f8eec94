use crate::manifest::efficiency::ratio;
use crate::manifest::parse::{SkipReason, parse_line};
use crate::manifest::types::{ManifestRecord, RunRecord, TaskRecord};
use serde::Serialize;
use tracing::debug;

/// Per-reason tally of manifest lines that produced no record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipCounts {
    pub not_json_shaped: usize,
    pub invalid_json: usize,
    pub unrecognized_shape: usize,
    pub malformed_fields: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::NotJsonShaped => self.not_json_shaped += 1,
            SkipReason::InvalidJson(_) => self.invalid_json += 1,
            SkipReason::UnrecognizedShape => self.unrecognized_shape += 1,
            SkipReason::MalformedFields(_) => self.malformed_fields += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.not_json_shaped + self.invalid_json + self.unrecognized_shape + self.malformed_fields
    }
}

/// Everything recovered from one pass over a manifest stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestScan {
    /// Last run-level record seen, if any.
    pub run_details: Option<RunRecord>,
    pub tasks: Vec<TaskRecord>,
    /// Lines examined, parsed or not.
    pub lines: usize,
    pub skipped: SkipCounts,
}

/// Classify every line of a manifest stream, keeping going past bad lines.
pub fn scan_manifest<'a, I>(messages: I) -> ManifestScan
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scan = ManifestScan::default();

    for (index, message) in messages.into_iter().enumerate() {
        scan.lines += 1;

        match parse_line(message) {
            Ok(ManifestRecord::Run(run)) => scan.run_details = Some(run),
            Ok(ManifestRecord::Task(task)) => scan.tasks.push(task),
            Err(reason) => {
                // Plain text lines are expected; anything else is worth a look.
                if reason != SkipReason::NotJsonShaped {
                    debug!(line = index, reason = %reason, "skipping manifest line");
                }
                scan.skipped.record(&reason);
            }
        }
    }

    scan
}

/// Run-wide totals over a set of task records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencySummary {
    pub total_tasks: usize,
    pub total_allocated_cpus: f64,
    #[serde(rename = "totalAllocatedMemoryGiB")]
    pub total_allocated_memory_gib: f64,
    pub total_actual_cpu_usage: f64,
    #[serde(rename = "totalActualMemoryUsageGiB")]
    pub total_actual_memory_usage_gib: f64,
    pub overall_cpu_efficiency: f64,
    pub overall_memory_efficiency: f64,
}

pub fn aggregate(tasks: &[TaskRecord]) -> EfficiencySummary {
    let total_allocated_cpus: f64 = tasks.iter().map(|t| t.allocated_cpus).sum();
    let total_allocated_memory_gib: f64 = tasks.iter().map(|t| t.allocated_memory_gib).sum();
    let total_actual_cpu_usage: f64 = tasks.iter().map(|t| t.avg_cpu_utilization).sum();
    let total_actual_memory_usage_gib: f64 =
        tasks.iter().map(|t| t.avg_memory_utilization_gib).sum();

    EfficiencySummary {
        total_tasks: tasks.len(),
        total_allocated_cpus,
        total_allocated_memory_gib,
        total_actual_cpu_usage,
        total_actual_memory_usage_gib,
        overall_cpu_efficiency: ratio(total_actual_cpu_usage, total_allocated_cpus),
        overall_memory_efficiency: ratio(total_actual_memory_usage_gib, total_allocated_memory_gib),
    }
}
