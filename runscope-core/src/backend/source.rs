use crate::backend::error::BackendError;
use crate::backend::types::{
    ListTasksRequest, LogEventsRequest, RawLogPage, RunDetails, TaskPage,
};
use async_trait::async_trait;

/// The run lifecycle service: run metadata and task listings.
#[async_trait]
pub trait RunMetadataSource: Send + Sync {
    async fn get_run(&self, run_id: &str) -> Result<RunDetails, BackendError>;

    async fn list_run_tasks(&self, request: &ListTasksRequest) -> Result<TaskPage, BackendError>;
}

/// The log service holding engine, manifest, run and task streams.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn get_log_events(&self, request: &LogEventsRequest) -> Result<RawLogPage, BackendError>;
}
