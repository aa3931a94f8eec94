use crate::manifest::{OVER_PROVISIONED_THRESHOLD, TARGET_EFFICIENCY, UNDER_PROVISIONED_THRESHOLD};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Fixed guidance for whoever interprets an analysis report.
///
/// Identical on every call; nothing in here is derived from run data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInstructions {
    pub focus_areas: Vec<FocusArea>,
    pub key_metrics: Vec<MetricReference>,
    pub thresholds: Thresholds,
}

#[derive(Debug, Serialize)]
pub struct FocusArea {
    pub title: &'static str,
    pub guidance: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct MetricReference {
    pub field: &'static str,
    pub meaning: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub over_provisioned_below: f64,
    pub under_provisioned_above: f64,
    pub target_efficiency: f64,
}

pub fn analysis_instructions() -> &'static AnalysisInstructions {
    &INSTRUCTIONS
}

static INSTRUCTIONS: Lazy<AnalysisInstructions> = Lazy::new(|| AnalysisInstructions {
    focus_areas: vec![
        FocusArea {
            title: "Resource Utilization Efficiency",
            guidance: vec![
                "**CPU Efficiency**: Compare `avgCpuUtilization` vs `reservedCpus` for each task",
                "**Memory Efficiency**: Compare `avgMemoryUtilizationGiB` vs `reservedMemoryGiB` for each task",
                "**Identify Over-Provisioned Tasks**: Tasks with efficiency ratios < 50% (wasting resources)",
                "**Identify Under-Provisioned Tasks**: Tasks with max utilization > 90% (may need more resources)",
            ],
        },
        FocusArea {
            title: "Cost Optimization Opportunities",
            guidance: vec![
                "Calculate potential savings from right-sizing over-provisioned tasks",
                "Estimate cost of wasted CPU and memory resources (`wastedCpus`, `wastedMemoryGiB`)",
                "Recommend optimal instance types based on actual usage patterns",
            ],
        },
        FocusArea {
            title: "Performance Analysis",
            guidance: vec![
                "Analyze `runningSeconds` for each task to identify bottlenecks",
                "Compare similar tasks (same `taskName` pattern) for consistency",
                "Look for tasks that could benefit from different resource configurations",
                "Identify workflow parallelization opportunities",
            ],
        },
        FocusArea {
            title: "Instance Type Optimization",
            guidance: vec![
                "Review `instanceType` assignments vs actual resource usage",
                "Recommend more cost-effective instance types where appropriate",
                "Consider memory-optimized vs compute-optimized instances based on usage patterns",
            ],
        },
        FocusArea {
            title: "Specific Recommendations",
            guidance: vec![
                "Current resource allocation vs actual usage",
                "Recommended resource allocation",
                "Estimated cost savings",
                "Priority level (high/medium/low impact)",
            ],
        },
        FocusArea {
            title: "Prioritization",
            guidance: vec![
                "Prioritize optimization efforts by potential impact",
                "Quantify the benefit of each recommendation",
            ],
        },
    ],
    key_metrics: vec![
        MetricReference {
            field: "cpuEfficiencyRatio",
            meaning: "Actual CPU usage / Reserved CPUs",
        },
        MetricReference {
            field: "memoryEfficiencyRatio",
            meaning: "Actual memory usage / Reserved memory",
        },
        MetricReference {
            field: "maxCpuEfficiencyRatio",
            meaning: "Peak CPU usage / Reserved CPUs",
        },
        MetricReference {
            field: "maxMemoryEfficiencyRatio",
            meaning: "Peak memory usage / Reserved memory",
        },
        MetricReference {
            field: "isOverProvisioned",
            meaning: "Average CPU or memory efficiency below the over-provisioned threshold",
        },
        MetricReference {
            field: "isUnderProvisioned",
            meaning: "Peak CPU or memory efficiency above the under-provisioned threshold",
        },
        MetricReference {
            field: "wastedCpus",
            meaning: "Reserved CPUs left unused on average",
        },
        MetricReference {
            field: "wastedMemoryGiB",
            meaning: "Reserved memory left unused on average",
        },
    ],
    thresholds: Thresholds {
        over_provisioned_below: OVER_PROVISIONED_THRESHOLD,
        under_provisioned_above: UNDER_PROVISIONED_THRESHOLD,
        target_efficiency: TARGET_EFFICIENCY,
    },
});
