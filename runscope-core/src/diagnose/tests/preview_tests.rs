use crate::backend::*;
use crate::diagnose::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn snapshot_with_failed_tasks(n: usize) -> TelemetrySnapshot {
    let run = RunDetails {
        id: "r1".into(),
        arn: None,
        name: "r1".into(),
        status: RunStatus::Failed,
        workflow_id: "wf".into(),
        workflow_type: None,
        status_message: None,
        failure_reason: None,
        uuid: None,
        creation_time: None,
        start_time: None,
        stop_time: None,
        output_uri: String::new(),
    };
    let tasks = (0..n)
        .map(|i| TaskSummary {
            task_id: format!("t{i}"),
            name: format!("task-{i}"),
            status: TaskStatus::Failed,
            status_message: None,
        })
        .collect();

    TelemetrySnapshot::default().with_run(run).with_tasks("r1", tasks)
}

#[tokio::test]
async fn preview_takes_only_the_first_page() {
    let backend = Arc::new(InMemoryBackend::new(snapshot_with_failed_tasks(25)));
    let ctx = BackendContext::new(
        "us-east-1",
        "/aws/omics/WorkflowLog",
        backend.clone(),
        backend.clone(),
    );

    let preview = preview_failed_tasks(&ctx, "r1", DEFAULT_PREVIEW_LIMIT).await.unwrap();

    assert_eq!(preview.tasks.len(), 10);
    assert_eq!(preview.tasks[0].task_id, "t0");
    assert!(preview.next_token.is_some());
    assert_eq!(backend.calls().list_run_tasks, 1);
    assert_eq!(backend.calls().get_log_events, 0);
}

#[tokio::test]
async fn preview_of_unknown_run_fails_with_run_id() {
    let backend = Arc::new(InMemoryBackend::new(TelemetrySnapshot::default()));
    let ctx = BackendContext::new("us-east-1", "/aws/omics/WorkflowLog", backend.clone(), backend);

    let err = preview_failed_tasks(&ctx, "nope", 10).await.unwrap_err();

    assert_eq!(err.run_id(), "nope");
}
