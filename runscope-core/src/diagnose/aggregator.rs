use crate::backend::{BackendContext, ListTasksRequest, RunDetails, TaskStatus, TaskSummary};
use crate::diagnose::error::DiagnoseError;
use crate::diagnose::recommendations::recommendations;
use crate::diagnose::types::{
    CollectedLogs, DiagnoseOptions, Diagnosis, DiagnosisReport, DiagnosisSummary,
    FailedTaskReport, NO_FAILURE_REASON, NO_RUN_UUID, NO_STATUS_MESSAGE, RunTimestamps,
};
use crate::logs::{LogReadError, PageQuery, StreamKey, fetch_page};
use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use tracing::{error, info, warn};

/// Collect everything known about why a run failed.
///
/// Only the run lookup and the failed-task enumeration can fail the call.
/// Engine, manifest and per-task log fetch failures are written into the
/// report as single synthetic lines and diagnosis carries on.
pub async fn diagnose(
    ctx: &BackendContext,
    run_id: &str,
    opts: &DiagnoseOptions,
) -> Result<Diagnosis, DiagnoseError> {
    let run = ctx
        .runs
        .get_run(run_id)
        .await
        .map_err(|source| DiagnoseError::RunLookup {
            run_id: run_id.to_string(),
            source,
        })?;

    if !run.status.is_failed() {
        info!(run_id, status = run.status.as_str(), "run has not failed, skipping diagnosis");
        return Ok(Diagnosis::not_failed(run.status));
    }

    info!(run_id, run_uuid = ?run.uuid, "diagnosing failed run");

    //--------------------------------------------------------------------------
    // Run-level streams
    //--------------------------------------------------------------------------
    let engine = match latest_messages(ctx, &StreamKey::engine(run_id), opts.log_page_size).await {
        Ok(lines) => {
            info!(run_id, entries = lines.len(), "retrieved engine log entries");
            CollectedLogs::Fetched(lines)
        }
        Err(err) => {
            let message = format!("Error retrieving engine logs: {err}");
            error!(run_id, error = %err, "{message}");
            CollectedLogs::Failed(message)
        }
    };

    let manifest = match run.uuid.as_deref() {
        Some(uuid) => {
            let key = StreamKey::manifest(run_id, Some(uuid.to_string()));
            match latest_messages(ctx, &key, opts.log_page_size).await {
                Ok(lines) => {
                    info!(run_id, entries = lines.len(), "retrieved manifest log entries");
                    CollectedLogs::Fetched(lines)
                }
                Err(err) => {
                    let message = format!("Error retrieving manifest logs: {err}");
                    error!(run_id, error = %err, "{message}");
                    CollectedLogs::Failed(message)
                }
            }
        }
        None => {
            warn!(run_id, "no run uuid available, skipping manifest logs");
            CollectedLogs::Unavailable(NO_RUN_UUID)
        }
    };

    //--------------------------------------------------------------------------
    // Failed tasks, every page
    //--------------------------------------------------------------------------
    let failed_tasks = collect_failed_tasks(ctx, run_id, opts).await?;

    info!(run_id, failed_tasks = failed_tasks.len(), "diagnosis complete");

    Ok(Diagnosis::Failed(Box::new(assemble(
        run,
        engine,
        manifest,
        failed_tasks,
    ))))
}

async fn collect_failed_tasks(
    ctx: &BackendContext,
    run_id: &str,
    opts: &DiagnoseOptions,
) -> Result<Vec<FailedTaskReport>, DiagnoseError> {
    let concurrency = opts.task_log_concurrency.max(1);
    let mut reports = Vec::new();
    let mut starting_token: Option<String> = None;

    // Only an absent continuation token ends the enumeration.
    loop {
        let request = ListTasksRequest {
            run_id: run_id.to_string(),
            status: Some(TaskStatus::Failed),
            max_results: opts.task_page_size,
            starting_token: starting_token.take(),
        };

        let page = ctx
            .runs
            .list_run_tasks(&request)
            .await
            .map_err(|source| DiagnoseError::TaskEnumeration {
                run_id: run_id.to_string(),
                source,
            })?;

        // `buffered` yields in input order, whatever order fetches finish in.
        let page_reports: Vec<FailedTaskReport> = stream::iter(page.items)
            .map(|task| task_report(ctx, run_id, task, opts.log_page_size))
            .buffered(concurrency)
            .collect()
            .await;

        reports.extend(page_reports);

        match page.next_token {
            Some(token) if !token.is_empty() => starting_token = Some(token),
            _ => break,
        }
    }

    Ok(reports)
}

async fn task_report(
    ctx: &BackendContext,
    run_id: &str,
    task: TaskSummary,
    log_page_size: u32,
) -> FailedTaskReport {
    info!(run_id, task_id = %task.task_id, name = %task.name, "processing failed task");

    let key = StreamKey::task(run_id, task.task_id.clone());
    let logs = match latest_messages(ctx, &key, log_page_size).await {
        Ok(lines) => {
            info!(
                run_id,
                task_id = %task.task_id,
                entries = lines.len(),
                "retrieved task log entries"
            );
            lines
        }
        Err(err) => {
            let message = format!("Error retrieving task logs for {}: {err}", task.task_id);
            error!(run_id, task_id = %task.task_id, error = %err, "{message}");
            vec![message]
        }
    };

    FailedTaskReport {
        log_count: logs.len(),
        task_id: task.task_id,
        name: task.name,
        status_message: task
            .status_message
            .unwrap_or_else(|| NO_STATUS_MESSAGE.to_string()),
        logs,
    }
}

async fn latest_messages(
    ctx: &BackendContext,
    key: &StreamKey,
    limit: u32,
) -> Result<Vec<String>, LogReadError> {
    let page = fetch_page(ctx, key, &PageQuery::latest(limit)).await?;
    Ok(page.events.into_iter().map(|e| e.message).collect())
}

fn assemble(
    run: RunDetails,
    engine: CollectedLogs,
    manifest: CollectedLogs,
    failed_tasks: Vec<FailedTaskReport>,
) -> DiagnosisReport {
    let summary = DiagnosisSummary {
        total_failed_tasks: failed_tasks.len(),
        has_manifest_logs: manifest.has_entries(),
        has_engine_logs: engine.has_entries(),
        diagnosis_timestamp: Utc::now(),
    };

    let engine_logs = engine.into_lines();
    let manifest_logs = manifest.into_lines();

    DiagnosisReport {
        run_id: run.id,
        run_uuid: run.uuid,
        status: run.status,
        failure_reason: run
            .failure_reason
            .unwrap_or_else(|| NO_FAILURE_REASON.to_string()),
        timestamps: RunTimestamps {
            creation_time: run.creation_time,
            start_time: run.start_time,
            stop_time: run.stop_time,
        },
        workflow_id: run.workflow_id,
        workflow_type: run.workflow_type,
        engine_log_count: engine_logs.len(),
        engine_logs,
        manifest_log_count: manifest_logs.len(),
        manifest_logs,
        failed_task_count: failed_tasks.len(),
        failed_tasks,
        recommendations: recommendations(),
        summary,
    }
}
