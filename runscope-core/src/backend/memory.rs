use crate::backend::error::BackendError;
use crate::backend::snapshot::TelemetrySnapshot;
use crate::backend::source::{LogSource, RunMetadataSource};
use crate::backend::types::{
    ListTasksRequest, LogEventsRequest, RawLogEvent, RawLogPage, RunDetails, TaskPage,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

const FORWARD_PREFIX: &str = "f/";
const BACKWARD_PREFIX: &str = "b/";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get_run: usize,
    pub list_run_tasks: usize,
    pub get_log_events: usize,
}

/// Backend serving a [`TelemetrySnapshot`] from memory.
///
/// Used by the command line when pointed at a snapshot file, and by tests,
/// which can inject faults per run, per stream or per task listing and then
/// inspect how many calls each method received.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    snapshot: TelemetrySnapshot,

    /// Server-side cap on tasks per page, below whatever the caller asks for.
    task_page_cap: Option<usize>,

    run_faults: HashMap<String, BackendError>,
    stream_faults: HashMap<String, BackendError>,
    task_listing_faults: HashMap<String, BackendError>,

    get_run_calls: AtomicUsize,
    list_run_tasks_calls: AtomicUsize,
    get_log_events_calls: AtomicUsize,
    log_requests: Mutex<Vec<LogEventsRequest>>,
}

impl InMemoryBackend {
    pub fn new(snapshot: TelemetrySnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    pub fn with_task_page_cap(mut self, cap: usize) -> Self {
        self.task_page_cap = Some(cap.max(1));
        self
    }

    pub fn with_run_fault(mut self, run_id: impl Into<String>, err: BackendError) -> Self {
        self.run_faults.insert(run_id.into(), err);
        self
    }

    pub fn with_stream_fault(mut self, stream: impl Into<String>, err: BackendError) -> Self {
        self.stream_faults.insert(stream.into(), err);
        self
    }

    pub fn with_task_listing_fault(mut self, run_id: impl Into<String>, err: BackendError) -> Self {
        self.task_listing_faults.insert(run_id.into(), err);
        self
    }

    pub fn calls(&self) -> CallCounts {
        CallCounts {
            get_run: self.get_run_calls.load(Ordering::Relaxed),
            list_run_tasks: self.list_run_tasks_calls.load(Ordering::Relaxed),
            get_log_events: self.get_log_events_calls.load(Ordering::Relaxed),
        }
    }

    /// Every log request received so far, in arrival order.
    pub fn log_requests(&self) -> Vec<LogEventsRequest> {
        self.log_requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record_log_request(&self, request: &LogEventsRequest) {
        self.log_requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
    }
}

#[async_trait]
impl RunMetadataSource for InMemoryBackend {
    async fn get_run(&self, run_id: &str) -> Result<RunDetails, BackendError> {
        self.get_run_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(err) = self.run_faults.get(run_id) {
            return Err(err.clone());
        }

        self.snapshot
            .runs
            .iter()
            .find(|r| r.id == run_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found(format!("run {run_id}")))
    }

    async fn list_run_tasks(&self, request: &ListTasksRequest) -> Result<TaskPage, BackendError> {
        self.list_run_tasks_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(err) = self.task_listing_faults.get(&request.run_id) {
            return Err(err.clone());
        }

        if !self.snapshot.runs.iter().any(|r| r.id == request.run_id) {
            return Err(BackendError::not_found(format!("run {}", request.run_id)));
        }

        let matching: Vec<_> = self
            .snapshot
            .tasks
            .get(&request.run_id)
            .map(|tasks| {
                tasks
                    .iter()
                    .filter(|t| request.status.is_none_or(|s| t.status == s))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let offset = match &request.starting_token {
            Some(token) => token.parse::<usize>().map_err(|_| {
                BackendError::service("ValidationException", format!("invalid token '{token}'"))
            })?,
            None => 0,
        };

        let mut page_size = request.max_results.max(1) as usize;
        if let Some(cap) = self.task_page_cap {
            page_size = page_size.min(cap);
        }

        let start = offset.min(matching.len());
        let end = (start + page_size).min(matching.len());

        Ok(TaskPage {
            items: matching[start..end].to_vec(),
            next_token: (end < matching.len()).then(|| end.to_string()),
        })
    }
}

#[async_trait]
impl LogSource for InMemoryBackend {
    async fn get_log_events(&self, request: &LogEventsRequest) -> Result<RawLogPage, BackendError> {
        self.get_log_events_calls.fetch_add(1, Ordering::Relaxed);
        self.record_log_request(request);

        if let Some(err) = self.stream_faults.get(&request.log_stream) {
            return Err(err.clone());
        }

        let stream = self.snapshot.streams.get(&request.log_stream).ok_or_else(|| {
            BackendError::not_found(format!(
                "log stream {}:{}",
                request.log_group, request.log_stream
            ))
        })?;

        // startTime is inclusive, endTime exclusive.
        let visible: Vec<&RawLogEvent> = stream
            .iter()
            .filter(|e| request.start_time_ms.is_none_or(|start| e.timestamp >= start))
            .filter(|e| request.end_time_ms.is_none_or(|end| e.timestamp < end))
            .collect();

        let limit = request.limit.max(1) as usize;

        let (start, end, next) = if request.start_from_head {
            let start = parse_token(request.next_token.as_deref(), FORWARD_PREFIX)?
                .unwrap_or(0)
                .min(visible.len());
            let end = (start + limit).min(visible.len());
            let next = (end < visible.len()).then(|| format!("{FORWARD_PREFIX}{end}"));
            (start, end, next)
        } else {
            let end = parse_token(request.next_token.as_deref(), BACKWARD_PREFIX)?
                .unwrap_or(visible.len())
                .min(visible.len());
            let start = end.saturating_sub(limit);
            let next = (start > 0).then(|| format!("{BACKWARD_PREFIX}{start}"));
            (start, end, next)
        };

        Ok(RawLogPage {
            events: visible[start..end].iter().map(|e| (*e).clone()).collect(),
            next_forward_token: next,
        })
    }
}

fn parse_token(token: Option<&str>, prefix: &str) -> Result<Option<usize>, BackendError> {
    let Some(token) = token else {
        return Ok(None);
    };

    token
        .strip_prefix(prefix)
        .and_then(|pos| pos.parse::<usize>().ok())
        .map(Some)
        .ok_or_else(|| {
            BackendError::service(
                "InvalidParameterException",
                format!("the specified nextToken is invalid: '{token}'"),
            )
        })
}
