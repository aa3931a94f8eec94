use crate::manifest::efficiency::DerivedEfficiency;
use serde::Serialize;
use serde_json::Value;

/// A structured manifest line, discriminated by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "recordType", rename_all = "camelCase")]
pub enum ManifestRecord {
    Run(RunRecord),
    Task(TaskRecord),
}

/// Run-level summary written once per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub arn: String,
    pub digest: String,
    pub running_seconds: f64,
    pub parameters: Value,
    pub parameter_template: Value,
    pub storage_type: String,
    pub role_arn: String,
    pub started_by: String,
    pub output_uri: String,
    pub resource_digests: Value,
}

/// Task-level summary: what was allocated, what was reserved, what was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub task_name: String,
    pub task_arn: String,
    pub task_uuid: String,

    // Allocation
    pub allocated_cpus: f64,
    #[serde(rename = "allocatedMemoryGiB")]
    pub allocated_memory_gib: f64,
    pub instance_type: String,
    pub gpus: f64,
    pub image: String,

    // Reservation and measured usage
    pub reserved_cpus: f64,
    #[serde(rename = "reservedMemoryGiB")]
    pub reserved_memory_gib: f64,
    pub reserved_gpus: f64,
    pub avg_cpu_utilization: f64,
    pub max_cpu_utilization: f64,
    #[serde(rename = "avgMemoryUtilizationGiB")]
    pub avg_memory_utilization_gib: f64,
    #[serde(rename = "maxMemoryUtilizationGiB")]
    pub max_memory_utilization_gib: f64,

    // Timing
    pub running_seconds: f64,
    pub start_time: String,
    pub stop_time: String,
    pub creation_time: String,
    pub status: String,

    #[serde(flatten)]
    pub efficiency: DerivedEfficiency,
}
