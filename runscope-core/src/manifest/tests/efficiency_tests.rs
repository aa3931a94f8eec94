use crate::manifest::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn task(
    cpu_avg: f64,
    cpu_max: f64,
    cpu_reserved: f64,
    mem_avg: f64,
    mem_reserved: f64,
) -> TaskRecord {
    let line = json!({
        "cpus": cpu_reserved,
        "memory": mem_reserved,
        "instanceType": "omics.c.large",
        "metrics": {
            "cpusReserved": cpu_reserved,
            "cpusAverage": cpu_avg,
            "cpusMaximum": cpu_max,
            "memoryReservedGiB": mem_reserved,
            "memoryAverageGiB": mem_avg,
            "memoryMaximumGiB": mem_avg
        }
    })
    .to_string();

    match classify(&line) {
        Some(ManifestRecord::Task(task)) => task,
        other => panic!("expected a task record, got {other:?}"),
    }
}

#[test]
fn zero_reservation_yields_zero_ratio_and_zero_waste() {
    let t = task(2.0, 3.0, 0.0, 1.0, 0.0);

    assert_eq!(t.efficiency.cpu_efficiency_ratio, 0.0);
    assert_eq!(t.efficiency.max_cpu_efficiency_ratio, 0.0);
    assert_eq!(t.efficiency.memory_efficiency_ratio, 0.0);
    assert_eq!(t.efficiency.wasted_cpus, 0.0);
    assert_eq!(t.efficiency.wasted_memory_gib, 0.0);
    assert!(t.efficiency.cpu_efficiency_ratio.is_finite());
}

#[test]
fn exactly_half_is_not_over_provisioned() {
    let t = task(2.0, 2.0, 4.0, 4.0, 8.0);

    assert_eq!(t.efficiency.cpu_efficiency_ratio, 0.5);
    assert!(!t.efficiency.is_over_provisioned);
}

#[test]
fn just_under_half_is_over_provisioned() {
    let t = task(1.9996, 2.0, 4.0, 4.0, 8.0);

    assert!(t.efficiency.cpu_efficiency_ratio < OVER_PROVISIONED_THRESHOLD);
    assert!(t.efficiency.is_over_provisioned);
}

#[test]
fn low_memory_alone_flags_over_provisioning() {
    let t = task(3.0, 3.0, 4.0, 1.0, 8.0);
    assert!(t.efficiency.is_over_provisioned);
}

#[test]
fn peak_at_threshold_is_not_under_provisioned() {
    let t = task(2.0, 3.6, 4.0, 4.0, 8.0);

    assert_eq!(t.efficiency.max_cpu_efficiency_ratio, 0.9);
    assert!(!t.efficiency.is_under_provisioned);
}

#[test]
fn peak_above_threshold_is_under_provisioned() {
    let t = task(2.0, 3.8, 4.0, 4.0, 8.0);
    assert!(t.efficiency.is_under_provisioned);
}

#[test]
fn waste_never_goes_negative() {
    let t = task(5.0, 5.0, 4.0, 10.0, 8.0);

    assert_eq!(t.efficiency.wasted_cpus, 0.0);
    assert_eq!(t.efficiency.wasted_memory_gib, 0.0);
    assert_eq!(t.efficiency.cpu_efficiency_ratio, 1.25);
}

#[test]
fn waste_is_reserved_minus_average() {
    let t = task(1.0, 2.0, 4.0, 2.0, 8.0);

    assert_eq!(t.efficiency.wasted_cpus, 3.0);
    assert_eq!(t.efficiency.wasted_memory_gib, 6.0);
}

#[test]
fn recomputing_matches_the_attached_efficiency() {
    let t = task(1.0, 2.0, 4.0, 2.0, 8.0);
    assert_eq!(compute_efficiency(&t), t.efficiency);
}

#[test]
fn policy_constants_are_fixed() {
    assert_eq!(OVER_PROVISIONED_THRESHOLD, 0.5);
    assert_eq!(UNDER_PROVISIONED_THRESHOLD, 0.9);
    assert_eq!(TARGET_EFFICIENCY, 0.7);
}
