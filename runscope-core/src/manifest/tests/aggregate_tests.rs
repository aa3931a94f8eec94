use crate::manifest::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn task_line(name: &str, cpus: f64, cpu_avg: f64, memory: f64, mem_avg: f64) -> String {
    json!({
        "name": name,
        "cpus": cpus,
        "memory": memory,
        "instanceType": "omics.c.large",
        "metrics": {
            "cpusReserved": cpus,
            "cpusAverage": cpu_avg,
            "memoryReservedGiB": memory,
            "memoryAverageGiB": mem_avg
        }
    })
    .to_string()
}

fn run_line() -> String {
    json!({
        "arn": "arn:run",
        "name": "run",
        "workflow": "wf",
        "metrics": { "runningSeconds": 60 }
    })
    .to_string()
}

#[test]
fn scan_separates_run_tasks_and_skips() {
    let lines = vec![
        "Workflow manifest follows".to_string(),
        run_line(),
        task_line("a", 2.0, 1.0, 4.0, 2.0),
        "{ broken".to_string(),
        "{ \"also\": broken }".to_string(),
        json!({ "unrelated": true }).to_string(),
        task_line("b", 4.0, 4.0, 8.0, 4.0),
    ];

    let scan = scan_manifest(lines.iter().map(String::as_str));

    assert_eq!(scan.lines, 7);
    assert_eq!(scan.tasks.len(), 2);
    assert_eq!(scan.tasks[0].task_name, "a");
    assert_eq!(scan.tasks[1].task_name, "b");
    assert_eq!(scan.run_details.map(|r| r.arn), Some("arn:run".to_string()));
    assert_eq!(
        scan.skipped,
        SkipCounts {
            not_json_shaped: 2,
            invalid_json: 1,
            unrecognized_shape: 1,
            malformed_fields: 0,
        }
    );
    assert_eq!(scan.skipped.total(), 4);
}

#[test]
fn aggregate_sums_and_divides_totals() {
    let lines = [
        task_line("a", 2.0, 1.0, 4.0, 2.0),
        task_line("b", 6.0, 3.0, 12.0, 3.0),
    ];
    let scan = scan_manifest(lines.iter().map(String::as_str));

    let summary = aggregate(&scan.tasks);

    assert_eq!(
        summary,
        EfficiencySummary {
            total_tasks: 2,
            total_allocated_cpus: 8.0,
            total_allocated_memory_gib: 16.0,
            total_actual_cpu_usage: 4.0,
            total_actual_memory_usage_gib: 5.0,
            overall_cpu_efficiency: 0.5,
            overall_memory_efficiency: 0.3125,
        }
    );
}

#[test]
fn aggregate_of_nothing_is_all_zero() {
    let summary = aggregate(&[]);

    assert_eq!(summary, EfficiencySummary::default());
    assert_eq!(summary.overall_cpu_efficiency, 0.0);
}

#[test]
fn summary_serializes_with_expected_keys() {
    let value = serde_json::to_value(aggregate(&[])).unwrap();

    for key in [
        "totalTasks",
        "totalAllocatedCpus",
        "totalAllocatedMemoryGiB",
        "totalActualCpuUsage",
        "totalActualMemoryUsageGiB",
        "overallCpuEfficiency",
        "overallMemoryEfficiency",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}
