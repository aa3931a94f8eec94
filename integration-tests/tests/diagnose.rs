use integration_tests::harness::{Scenario, capture_events};
use pretty_assertions::assert_eq;
use runscope_core::backend::{BackendError, RunStatus};
use runscope_core::diagnose::{DiagnoseOptions, Diagnosis, DiagnosisReport, diagnose};

fn failed_report(diagnosis: Diagnosis) -> DiagnosisReport {
    match diagnosis {
        Diagnosis::Failed(report) => *report,
        other => panic!("expected a failed-run report, got {other:?}"),
    }
}

/// Three pages of failed tasks (100, 100, 7) must all be enumerated.
#[tokio::test]
async fn diagnose_enumerates_every_page_of_failed_tasks() {
    // Arrange
    let (backend, ctx) = Scenario::new()
        .failed_run("r1")
        .failed_tasks("r1", 207)
        .completed_tasks("r1", 12)
        .build();

    // Act
    let report = failed_report(
        diagnose(&ctx, "r1", &DiagnoseOptions::default())
            .await
            .unwrap(),
    );

    // Assert
    assert_eq!(report.failed_tasks.len(), 207);
    assert_eq!(report.failed_task_count, 207);
    assert_eq!(report.summary.total_failed_tasks, 207);
    assert_eq!(report.failed_tasks[0].task_id, "t1");
    assert_eq!(report.failed_tasks[206].task_id, "t207");
    assert_eq!(backend.calls().list_run_tasks, 3);
}

/// A log fault on task #2 of 3 stays with task #2.
#[tokio::test]
async fn task_log_failure_is_isolated_to_that_task() {
    // Arrange
    let (_, ctx) = Scenario::new()
        .failed_run("r1")
        .failed_tasks("r1", 3)
        .task_logs("r1", "t1", &["t1 started", "t1 out of memory"])
        .task_logs("r1", "t3", &["t3 started", "t3 missing input"])
        .stream_fault("run/r1/task/t2", BackendError::unavailable("connection reset"))
        .build();

    // Act
    let report = failed_report(
        diagnose(&ctx, "r1", &DiagnoseOptions::default())
            .await
            .unwrap(),
    );

    // Assert
    assert_eq!(report.failed_tasks.len(), 3);
    assert_eq!(report.failed_tasks[0].logs, vec!["t1 started", "t1 out of memory"]);
    assert_eq!(
        report.failed_tasks[1].logs,
        vec!["Error retrieving task logs for t2: service unavailable: connection reset"]
    );
    assert_eq!(report.failed_tasks[1].log_count, 1);
    assert_eq!(report.failed_tasks[2].logs, vec!["t3 started", "t3 missing input"]);
}

#[tokio::test]
async fn isolation_holds_with_concurrent_task_fetches() {
    let (_, ctx) = Scenario::new()
        .failed_run("r1")
        .failed_tasks("r1", 3)
        .task_logs("r1", "t1", &["one"])
        .task_logs("r1", "t3", &["three"])
        .stream_fault("run/r1/task/t2", BackendError::unavailable("connection reset"))
        .build();

    let opts = DiagnoseOptions {
        task_log_concurrency: 3,
        ..DiagnoseOptions::default()
    };
    let report = failed_report(diagnose(&ctx, "r1", &opts).await.unwrap());

    let logs: Vec<_> = report.failed_tasks.iter().map(|t| t.logs[0].as_str()).collect();
    assert_eq!(logs[0], "one");
    assert!(logs[1].starts_with("Error retrieving task logs for t2"));
    assert_eq!(logs[2], "three");
}

/// A RUNNING run is reported as-is without touching tasks or logs.
#[tokio::test]
async fn running_run_exits_early() {
    // Arrange
    let (backend, ctx) = Scenario::new()
        .run("r1", RunStatus::Running, Some("u1"))
        .failed_tasks("r1", 3)
        .build();

    // Act
    let diagnosis = diagnose(&ctx, "r1", &DiagnoseOptions::default())
        .await
        .unwrap();

    // Assert
    let value = serde_json::to_value(&diagnosis).unwrap();
    assert_eq!(value["status"], "RUNNING");
    assert_eq!(
        value["message"],
        "Run is not in FAILED state. Current status: RUNNING"
    );
    assert_eq!(backend.calls().get_run, 1);
    assert_eq!(backend.calls().list_run_tasks, 0);
    assert_eq!(backend.calls().get_log_events, 0);
}

#[tokio::test]
async fn unknown_run_is_fatal() {
    let (_, ctx) = Scenario::new().build();

    let err = diagnose(&ctx, "missing", &DiagnoseOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.run_id(), "missing");
    assert!(err.to_string().contains("resource not found"));
}

#[tokio::test]
async fn recovered_failures_are_logged_with_their_task() {
    let (log, _guard) = capture_events();
    let (_, ctx) = Scenario::new()
        .failed_run("r1")
        .failed_tasks("r1", 2)
        .stream_fault("run/r1/task/t2", BackendError::unavailable("down"))
        .build();

    diagnose(&ctx, "r1", &DiagnoseOptions::default())
        .await
        .unwrap();

    let errors: Vec<_> = log
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::ERROR)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("task_id"), Some("t2"));
    assert_eq!(errors[0].field("run_id"), Some("r1"));

    let done = log.with_message("diagnosis complete");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].field("failed_tasks"), Some("2"));
}
