use crate::analysis::instructions::{AnalysisInstructions, analysis_instructions};
use crate::analysis::types::{AnalysisReport, BatchSummary, RunAnalysis};
use crate::logs::timestamp::to_iso_utc;
use serde::Serialize;

// The embedded data never repeats the instruction block.
#[derive(Serialize)]
struct PromptData<'a> {
    runs: &'a [RunAnalysis],
    summary: &'a BatchSummary,
}

/// Render a report as a markdown brief for an automated reviewer.
///
/// `requested` is only used when nothing could be analyzed, to say which ids
/// came back empty.
pub fn render_analysis_prompt(report: &AnalysisReport, requested: &[String]) -> String {
    if report.runs.is_empty() {
        return render_unavailable(requested);
    }

    let mut out = String::new();

    out.push_str("# AWS HealthOmics Workflow Performance Analysis\n\n");
    out.push_str(
        "Please analyze the following AWS HealthOmics workflow run data and provide \
         comprehensive performance optimization recommendations.\n\n",
    );

    out.push_str(&format!(
        "## Run Data Summary\n\
         - **Total Runs Analyzed**: {}\n\
         - **Analysis Timestamp**: {}\n\
         - **Analysis Type**: {}\n\n",
        report.summary.total_runs,
        to_iso_utc(&report.summary.analysis_timestamp),
        report.summary.analysis_type,
    ));

    let data = PromptData {
        runs: &report.runs,
        summary: &report.summary,
    };
    let json = serde_json::to_string_pretty(&data).unwrap_or_default();
    out.push_str("## Detailed Run and Task Metrics\n\n```json\n");
    out.push_str(&json);
    out.push_str("\n```\n\n");

    render_instructions(&mut out, analysis_instructions());

    out.push_str(
        "Please provide specific, actionable recommendations with quantified benefits \
         and clear prioritization.\n",
    );

    out
}

fn render_instructions(out: &mut String, instructions: &AnalysisInstructions) {
    out.push_str("## Analysis Instructions\n\n");
    out.push_str(
        "Please provide a comprehensive performance analysis report focusing on these key areas:\n\n",
    );

    for (i, area) in instructions.focus_areas.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n", i + 1, area.title));
        for line in &area.guidance {
            out.push_str(&format!("- {line}\n"));
        }
        out.push('\n');
    }

    out.push_str("## Key Metrics Reference\n");
    for metric in &instructions.key_metrics {
        out.push_str(&format!("- `{}`: {}\n", metric.field, metric.meaning));
    }
    out.push('\n');

    let t = &instructions.thresholds;
    out.push_str(&format!(
        "## Optimization Thresholds\n\
         - **Over-provisioned threshold**: < {:.0}% efficiency\n\
         - **Under-provisioned threshold**: > {:.0}% max utilization\n\
         - **Target efficiency**: ~{:.0}% for optimal cost/performance balance\n\n",
        t.over_provisioned_below * 100.0,
        t.under_provisioned_above * 100.0,
        t.target_efficiency * 100.0,
    ));
}

fn render_unavailable(requested: &[String]) -> String {
    format!(
        "I was unable to retrieve manifest data for the specified run IDs: {}\n\n\
         This could be because:\n\
         - The runs are still in progress (manifest logs are only available after completion)\n\
         - The run IDs are invalid\n\
         - There was an error accessing the CloudWatch logs\n\n\
         Please verify the run IDs and ensure the runs have completed successfully.\n",
        requested.join(", ")
    )
}
