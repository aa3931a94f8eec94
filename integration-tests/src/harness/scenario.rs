use runscope_core::backend::{
    BackendContext, BackendError, InMemoryBackend, RawLogEvent, RunDetails, RunStatus,
    TaskStatus, TaskSummary, TelemetrySnapshot,
};
use serde_json::json;
use std::sync::Arc;

pub const GROUP: &str = "/aws/omics/WorkflowLog";

/// 2022-01-01T00:00:00Z
pub const BASE_MS: i64 = 1_640_995_200_000;

/// Builder for an in-memory backend populated with runs, tasks and streams.
#[derive(Default)]
pub struct Scenario {
    snapshot: TelemetrySnapshot,
    run_faults: Vec<(String, BackendError)>,
    stream_faults: Vec<(String, BackendError)>,
    task_page_cap: Option<usize>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(mut self, id: &str, status: RunStatus, uuid: Option<&str>) -> Self {
        self.snapshot = self.snapshot.with_run(RunDetails {
            id: id.to_string(),
            arn: Some(format!("arn:aws:omics:us-east-1:123456789012:run/{id}")),
            name: format!("{id}-name"),
            status,
            workflow_id: "wf-1".to_string(),
            workflow_type: Some("PRIVATE".to_string()),
            status_message: None,
            failure_reason: matches!(status, RunStatus::Failed)
                .then(|| "One or more tasks failed".to_string()),
            uuid: uuid.map(str::to_string),
            creation_time: None,
            start_time: None,
            stop_time: None,
            output_uri: format!("s3://bucket/{id}/"),
        });
        self
    }

    pub fn failed_run(self, id: &str) -> Self {
        self.run(id, RunStatus::Failed, Some(&format!("{id}-uuid")))
    }

    /// `count` FAILED tasks named `t1..=tcount`.
    pub fn failed_tasks(mut self, run_id: &str, count: usize) -> Self {
        let tasks = (1..=count)
            .map(|i| TaskSummary {
                task_id: format!("t{i}"),
                name: format!("task-{i}"),
                status: TaskStatus::Failed,
                status_message: Some(format!("task-{i} exited with code 1")),
            })
            .collect();
        self.snapshot = self.snapshot.with_tasks(run_id, tasks);
        self
    }

    pub fn completed_tasks(mut self, run_id: &str, count: usize) -> Self {
        let tasks = (1..=count)
            .map(|i| TaskSummary {
                task_id: format!("ok{i}"),
                name: format!("ok-{i}"),
                status: TaskStatus::Completed,
                status_message: None,
            })
            .collect();
        self.snapshot = self.snapshot.with_tasks(run_id, tasks);
        self
    }

    pub fn stream<S: AsRef<str>>(mut self, name: &str, messages: &[S]) -> Self {
        let events = messages
            .iter()
            .enumerate()
            .map(|(i, m)| RawLogEvent {
                timestamp: BASE_MS + i as i64 * 1_000,
                message: m.as_ref().to_string(),
            })
            .collect();
        self.snapshot = self.snapshot.with_stream(name, events);
        self
    }

    pub fn task_logs(self, run_id: &str, task_id: &str, messages: &[&str]) -> Self {
        self.stream(&format!("run/{run_id}/task/{task_id}"), messages)
    }

    /// Manifest for `run_id` with one run record and one task record per
    /// `(name, reserved cpus, avg cpus)` entry.
    pub fn manifest(self, run_id: &str, uuid: &str, tasks: &[(&str, f64, f64)]) -> Self {
        let mut lines = vec![
            "Run manifest".to_string(),
            json!({
                "arn": format!("arn:aws:omics:us-east-1:123456789012:run/{run_id}"),
                "digest": "sha256:0000",
                "name": format!("{run_id}-name"),
                "workflow": "wf-1",
                "metrics": { "runningSeconds": 3600 },
                "storageType": "DYNAMIC"
            })
            .to_string(),
        ];
        for (name, reserved, avg) in tasks {
            lines.push(
                json!({
                    "name": name,
                    "cpus": reserved,
                    "memory": 8,
                    "instanceType": "omics.c.xlarge",
                    "metrics": {
                        "cpusReserved": reserved,
                        "cpusAverage": avg,
                        "cpusMaximum": avg,
                        "memoryReservedGiB": 8,
                        "memoryAverageGiB": 4,
                        "memoryMaximumGiB": 4,
                        "runningSeconds": 60
                    }
                })
                .to_string(),
            );
        }
        self.stream(&format!("manifest/run/{run_id}/{uuid}"), lines.as_slice())
    }

    pub fn run_fault(mut self, run_id: &str, err: BackendError) -> Self {
        self.run_faults.push((run_id.to_string(), err));
        self
    }

    pub fn stream_fault(mut self, stream: &str, err: BackendError) -> Self {
        self.stream_faults.push((stream.to_string(), err));
        self
    }

    pub fn task_page_cap(mut self, cap: usize) -> Self {
        self.task_page_cap = Some(cap);
        self
    }

    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.snapshot
    }

    pub fn build(self) -> (Arc<InMemoryBackend>, BackendContext) {
        let mut backend = InMemoryBackend::new(self.snapshot);
        for (run_id, err) in self.run_faults {
            backend = backend.with_run_fault(run_id, err);
        }
        for (stream, err) in self.stream_faults {
            backend = backend.with_stream_fault(stream, err);
        }
        if let Some(cap) = self.task_page_cap {
            backend = backend.with_task_page_cap(cap);
        }

        let backend = Arc::new(backend);
        let ctx = BackendContext::new("us-east-1", GROUP, backend.clone(), backend.clone());
        (backend, ctx)
    }
}
