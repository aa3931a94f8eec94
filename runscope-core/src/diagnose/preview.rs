use crate::backend::{BackendContext, ListTasksRequest, TaskStatus};
use crate::diagnose::error::DiagnoseError;
use crate::diagnose::types::FailedTaskPreview;
use tracing::debug;

pub const DEFAULT_PREVIEW_LIMIT: u32 = 10;

/// First page of a run's FAILED tasks, for a quick look.
///
/// Never paginates. Use [`diagnose`](crate::diagnose::diagnose) for the full
/// enumeration.
pub async fn preview_failed_tasks(
    ctx: &BackendContext,
    run_id: &str,
    limit: u32,
) -> Result<FailedTaskPreview, DiagnoseError> {
    let request = ListTasksRequest {
        run_id: run_id.to_string(),
        status: Some(TaskStatus::Failed),
        max_results: limit,
        starting_token: None,
    };

    let page = ctx
        .runs
        .list_run_tasks(&request)
        .await
        .map_err(|source| DiagnoseError::TaskEnumeration {
            run_id: run_id.to_string(),
            source,
        })?;

    debug!(
        run_id,
        tasks = page.items.len(),
        has_more = page.next_token.is_some(),
        "previewed failed tasks"
    );

    Ok(FailedTaskPreview {
        run_id: run_id.to_string(),
        tasks: page.items,
        next_token: page.next_token,
    })
}
