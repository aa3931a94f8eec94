use crate::manifest::efficiency::{DerivedEfficiency, compute_efficiency};
use crate::manifest::types::{ManifestRecord, RunRecord, TaskRecord};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a manifest line did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// Not wrapped in `{ ... }` once trimmed.
    #[error("not a JSON object")]
    NotJsonShaped,

    /// Looked like an object but did not parse.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Parsed, but matches neither the run nor the task shape.
    #[error("unrecognized record shape")]
    UnrecognizedShape,

    /// Matched a shape, but a field had the wrong type.
    #[error("malformed record fields: {0}")]
    MalformedFields(String),
}

//-----------------------------------------------------------------------------
// Shape predicates
//-----------------------------------------------------------------------------

// Run and task summaries both carry `name`; only tasks carry `cpus`.
fn is_run_record(obj: &Map<String, Value>) -> bool {
    obj.contains_key("workflow")
        && obj.contains_key("metrics")
        && obj.contains_key("name")
        && !obj.contains_key("cpus")
}

fn is_task_record(obj: &Map<String, Value>) -> bool {
    obj.contains_key("cpus") && obj.contains_key("memory") && obj.contains_key("instanceType")
}

//-----------------------------------------------------------------------------
// Parsing
//-----------------------------------------------------------------------------

/// Parse one raw manifest line into a typed record.
pub fn parse_line(raw: &str) -> Result<ManifestRecord, SkipReason> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return Err(SkipReason::NotJsonShaped);
    }

    let obj: Map<String, Value> =
        serde_json::from_str(trimmed).map_err(|e| SkipReason::InvalidJson(e.to_string()))?;

    if is_run_record(&obj) {
        let raw: RawRunManifest = serde_json::from_value(Value::Object(obj))
            .map_err(|e| SkipReason::MalformedFields(e.to_string()))?;
        Ok(ManifestRecord::Run(raw.into_record()))
    } else if is_task_record(&obj) {
        let raw: RawTaskManifest = serde_json::from_value(Value::Object(obj))
            .map_err(|e| SkipReason::MalformedFields(e.to_string()))?;
        Ok(ManifestRecord::Task(raw.into_record()))
    } else {
        Err(SkipReason::UnrecognizedShape)
    }
}

/// Classify a raw manifest line, discarding the reason for skipped lines.
pub fn classify(raw: &str) -> Option<ManifestRecord> {
    parse_line(raw).ok()
}

//-----------------------------------------------------------------------------
// Wire shapes
//-----------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawRunMetrics {
    running_seconds: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRunManifest {
    #[serde(default, deserialize_with = "lenient_string")]
    arn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    digest: Option<String>,
    metrics: Option<RawRunMetrics>,
    parameters: Option<Value>,
    parameter_template: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    storage_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    role_arn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    started_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    output_uri: Option<String>,
    resource_digests: Option<Value>,
}

impl RawRunManifest {
    fn into_record(self) -> RunRecord {
        RunRecord {
            arn: self.arn.unwrap_or_default(),
            digest: self.digest.unwrap_or_default(),
            running_seconds: self
                .metrics
                .and_then(|m| m.running_seconds)
                .unwrap_or_default(),
            parameters: object_or_empty(self.parameters),
            parameter_template: object_or_empty(self.parameter_template),
            storage_type: self.storage_type.unwrap_or_default(),
            role_arn: self.role_arn.unwrap_or_default(),
            started_by: self.started_by.unwrap_or_default(),
            output_uri: self.output_uri.unwrap_or_default(),
            resource_digests: object_or_empty(self.resource_digests),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawTaskMetrics {
    cpus_reserved: Option<f64>,
    cpus_average: Option<f64>,
    cpus_maximum: Option<f64>,
    #[serde(rename = "memoryReservedGiB")]
    memory_reserved_gib: Option<f64>,
    #[serde(rename = "memoryAverageGiB")]
    memory_average_gib: Option<f64>,
    #[serde(rename = "memoryMaximumGiB")]
    memory_maximum_gib: Option<f64>,
    gpus_reserved: Option<f64>,
    running_seconds: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaskManifest {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    arn: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    uuid: Option<String>,
    cpus: Option<f64>,
    memory: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    instance_type: Option<String>,
    gpus: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    image: Option<String>,
    metrics: Option<RawTaskMetrics>,
    #[serde(default, deserialize_with = "lenient_string")]
    start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    stop_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    creation_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
}

impl RawTaskManifest {
    fn into_record(self) -> TaskRecord {
        let metrics = self.metrics.unwrap_or_default();

        let mut record = TaskRecord {
            task_name: self.name.unwrap_or_else(|| "unknown".to_string()),
            task_arn: self.arn.unwrap_or_default(),
            task_uuid: self.uuid.unwrap_or_default(),
            allocated_cpus: self.cpus.unwrap_or_default(),
            allocated_memory_gib: self.memory.unwrap_or_default(),
            instance_type: self.instance_type.unwrap_or_default(),
            gpus: self.gpus.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            reserved_cpus: metrics.cpus_reserved.unwrap_or_default(),
            reserved_memory_gib: metrics.memory_reserved_gib.unwrap_or_default(),
            reserved_gpus: metrics.gpus_reserved.unwrap_or_default(),
            avg_cpu_utilization: metrics.cpus_average.unwrap_or_default(),
            max_cpu_utilization: metrics.cpus_maximum.unwrap_or_default(),
            avg_memory_utilization_gib: metrics.memory_average_gib.unwrap_or_default(),
            max_memory_utilization_gib: metrics.memory_maximum_gib.unwrap_or_default(),
            running_seconds: metrics.running_seconds.unwrap_or_default(),
            start_time: self.start_time.unwrap_or_default(),
            stop_time: self.stop_time.unwrap_or_default(),
            creation_time: self.creation_time.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            efficiency: DerivedEfficiency::default(),
        };

        record.efficiency = compute_efficiency(&record);
        record
    }
}

// Descriptive fields never decide whether a record is kept: strings pass
// through, other scalars are stringified, anything else reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn object_or_empty(value: Option<Value>) -> Value {
    match value {
        Some(Value::Null) | None => Value::Object(Map::new()),
        Some(v) => v,
    }
}
