use crate::manifest::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn task_line(extra: serde_json::Value) -> String {
    let mut obj = json!({
        "name": "align",
        "arn": "arn:aws:omics:us-east-1:123:task/t1",
        "uuid": "t-uuid",
        "cpus": 4,
        "memory": 8,
        "instanceType": "omics.c.xlarge",
        "gpus": 0,
        "image": "123.dkr.ecr.us-east-1.amazonaws.com/bwa:latest",
        "metrics": {
            "cpusReserved": 4,
            "cpusAverage": 3.0,
            "cpusMaximum": 3.8,
            "memoryReservedGiB": 8,
            "memoryAverageGiB": 6.0,
            "memoryMaximumGiB": 7.0,
            "gpusReserved": 0,
            "runningSeconds": 120.5
        },
        "status": "COMPLETED"
    });
    if let (Some(base), Some(extra)) = (obj.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    obj.to_string()
}

#[test]
fn run_shape_is_classified_as_run_record() {
    let line = json!({
        "arn": "arn:aws:omics:us-east-1:123:run/r1",
        "digest": "sha256:abc",
        "name": "my-run",
        "workflow": "wf-1",
        "metrics": { "runningSeconds": 3600.0 },
        "roleArn": "arn:aws:iam::123:role/omics",
        "outputUri": "s3://bucket/out"
    })
    .to_string();

    let Some(ManifestRecord::Run(run)) = classify(&line) else {
        panic!("expected a run record");
    };

    assert_eq!(run.arn, "arn:aws:omics:us-east-1:123:run/r1");
    assert_eq!(run.running_seconds, 3600.0);
    assert_eq!(run.role_arn, "arn:aws:iam::123:role/omics");
    assert_eq!(run.parameters, json!({}));
    assert_eq!(run.resource_digests, json!({}));
}

#[test]
fn cpus_key_excludes_the_run_shape() {
    // Carries every run key, but also the task keys.
    let line = task_line(json!({ "workflow": "wf-1" }));

    assert!(matches!(classify(&line), Some(ManifestRecord::Task(_))));
}

#[test]
fn task_shape_is_classified_with_metrics_flattened() {
    let Some(ManifestRecord::Task(task)) = classify(&task_line(json!({}))) else {
        panic!("expected a task record");
    };

    assert_eq!(task.task_name, "align");
    assert_eq!(task.allocated_cpus, 4.0);
    assert_eq!(task.allocated_memory_gib, 8.0);
    assert_eq!(task.reserved_cpus, 4.0);
    assert_eq!(task.avg_cpu_utilization, 3.0);
    assert_eq!(task.max_memory_utilization_gib, 7.0);
    assert_eq!(task.running_seconds, 120.5);
    assert_eq!(task.efficiency.cpu_efficiency_ratio, 0.75);
    assert_eq!(task.efficiency.memory_efficiency_ratio, 0.75);
    assert!(task.efficiency.is_under_provisioned);
    assert!(!task.efficiency.is_over_provisioned);
}

#[test]
fn missing_task_name_defaults_to_unknown() {
    let line = json!({ "cpus": 1, "memory": 2, "instanceType": "omics.m.large" }).to_string();

    let Some(ManifestRecord::Task(task)) = classify(&line) else {
        panic!("expected a task record");
    };

    assert_eq!(task.task_name, "unknown");
    assert_eq!(task.reserved_cpus, 0.0);
}

#[test]
fn unbracketed_lines_are_not_candidates() {
    for line in ["", "Run started", "  [1, 2, 3] ", "{\"cpus\": 1", "\"cpus\"}"] {
        assert_eq!(parse_line(line), Err(SkipReason::NotJsonShaped), "line {line:?}");
        assert_eq!(classify(line), None);
    }
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let line = format!("   {}\n", task_line(json!({})));
    assert!(matches!(classify(&line), Some(ManifestRecord::Task(_))));
}

#[test]
fn broken_json_is_skipped_not_raised() {
    let result = parse_line("{ this is not json }");
    assert!(matches!(result, Err(SkipReason::InvalidJson(_))));
}

#[test]
fn other_objects_are_unrecognized() {
    let cases = [
        json!({}),
        json!({ "workflow": "w", "metrics": {} }),
        json!({ "cpus": 1, "memory": 2 }),
        json!({ "event": "TASK_STARTED", "name": "align" }),
    ];

    for case in cases {
        assert_eq!(
            parse_line(&case.to_string()),
            Err(SkipReason::UnrecognizedShape),
            "case {case}"
        );
    }
}

#[test]
fn non_numeric_metrics_are_malformed() {
    let cases = [
        json!({ "cpus": "four", "memory": 2, "instanceType": "x" }).to_string(),
        task_line(json!({ "metrics": { "cpusAverage": "high" } })),
    ];

    for line in cases {
        assert!(
            matches!(parse_line(&line), Err(SkipReason::MalformedFields(_))),
            "line {line}"
        );
    }
}

#[test]
fn task_shape_keeps_oddly_typed_descriptive_fields() {
    let line = task_line(json!({
        "image": { "uri": "123.dkr.ecr.us-east-1.amazonaws.com/bwa:latest" },
        "status": 1,
        "uuid": null,
        "instanceType": ["omics.c.xlarge"],
        "name": 42
    }));

    let Ok(ManifestRecord::Task(task)) = parse_line(&line) else {
        panic!("expected a task record");
    };

    assert_eq!(task.image, "");
    assert_eq!(task.status, "1");
    assert_eq!(task.task_uuid, "");
    assert_eq!(task.instance_type, "");
    assert_eq!(task.task_name, "42");
    assert_eq!(task.reserved_cpus, 4.0);
    assert_eq!(task.efficiency.cpu_efficiency_ratio, 0.75);
}

#[test]
fn run_shape_keeps_oddly_typed_descriptive_fields() {
    let line = json!({
        "name": "my-run",
        "workflow": "wf-1",
        "metrics": { "runningSeconds": 60 },
        "digest": { "sha256": "abc" },
        "storageType": true
    })
    .to_string();

    let Ok(ManifestRecord::Run(run)) = parse_line(&line) else {
        panic!("expected a run record");
    };

    assert_eq!(run.digest, "");
    assert_eq!(run.storage_type, "true");
    assert_eq!(run.running_seconds, 60.0);
}

#[test]
fn classification_is_idempotent() {
    let line = task_line(json!({}));
    assert_eq!(classify(&line), classify(&line));
}

#[test]
fn task_record_serializes_with_camel_case_and_gib_suffixes() {
    let Some(record) = classify(&task_line(json!({}))) else {
        panic!("expected a record");
    };

    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["recordType"], "task");
    assert_eq!(value["taskName"], "align");
    assert_eq!(value["allocatedMemoryGiB"], 8.0);
    assert_eq!(value["avgMemoryUtilizationGiB"], 6.0);
    assert_eq!(value["cpuEfficiencyRatio"], 0.75);
    assert_eq!(value["wastedMemoryGiB"], 2.0);
    assert_eq!(value["isOverProvisioned"], false);
}
