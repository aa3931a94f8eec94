use crate::manifest::types::TaskRecord;
use serde::Serialize;

/// Average efficiency below this marks a task as over-provisioned.
pub const OVER_PROVISIONED_THRESHOLD: f64 = 0.5;
/// Peak efficiency above this marks a task as under-provisioned.
pub const UNDER_PROVISIONED_THRESHOLD: f64 = 0.9;
/// Efficiency band that balances cost against headroom.
pub const TARGET_EFFICIENCY: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedEfficiency {
    pub cpu_efficiency_ratio: f64,
    pub max_cpu_efficiency_ratio: f64,
    pub memory_efficiency_ratio: f64,
    pub max_memory_efficiency_ratio: f64,
    pub wasted_cpus: f64,
    #[serde(rename = "wastedMemoryGiB")]
    pub wasted_memory_gib: f64,
    pub is_over_provisioned: bool,
    pub is_under_provisioned: bool,
}

/// Usage over reservation, defined as `0` when nothing was reserved.
pub fn ratio(used: f64, reserved: f64) -> f64 {
    if reserved > 0.0 { used / reserved } else { 0.0 }
}

fn waste(reserved: f64, used: f64) -> f64 {
    if reserved > 0.0 { (reserved - used).max(0.0) } else { 0.0 }
}

pub fn compute_efficiency(task: &TaskRecord) -> DerivedEfficiency {
    let cpu_efficiency_ratio = ratio(task.avg_cpu_utilization, task.reserved_cpus);
    let max_cpu_efficiency_ratio = ratio(task.max_cpu_utilization, task.reserved_cpus);
    let memory_efficiency_ratio =
        ratio(task.avg_memory_utilization_gib, task.reserved_memory_gib);
    let max_memory_efficiency_ratio =
        ratio(task.max_memory_utilization_gib, task.reserved_memory_gib);

    DerivedEfficiency {
        cpu_efficiency_ratio,
        max_cpu_efficiency_ratio,
        memory_efficiency_ratio,
        max_memory_efficiency_ratio,
        wasted_cpus: waste(task.reserved_cpus, task.avg_cpu_utilization),
        wasted_memory_gib: waste(task.reserved_memory_gib, task.avg_memory_utilization_gib),
        is_over_provisioned: cpu_efficiency_ratio < OVER_PROVISIONED_THRESHOLD
            || memory_efficiency_ratio < OVER_PROVISIONED_THRESHOLD,
        is_under_provisioned: max_cpu_efficiency_ratio > UNDER_PROVISIONED_THRESHOLD
            || max_memory_efficiency_ratio > UNDER_PROVISIONED_THRESHOLD,
    }
}
