use crate::analysis::AnalysisReport;
use crate::backend::TaskSummary;
use crate::diagnose::DiagnosisReport;
use crate::logs::LogPage;
use crate::logs::timestamp::to_iso_utc;
use owo_colors::OwoColorize;

pub fn render_log_page(page: &LogPage) {
    if page.not_found {
        println!("{}", "log stream not found".yellow());
        return;
    }

    for event in &page.events {
        println!("{} {}", to_iso_utc(&event.timestamp).dimmed(), event.message);
    }

    if let Some(cursor) = &page.next_cursor {
        println!("{} {}", "next:".dimmed(), cursor.token());
    }
}

pub fn render_diagnosis(report: &DiagnosisReport) {
    println!("{} {}", "run".bold(), report.run_id.bold());
    println!("  status:  {}", report.status.as_str().red());
    println!("  reason:  {}", report.failure_reason);
    if let Some(uuid) = &report.run_uuid {
        println!("  uuid:    {uuid}");
    }
    println!();

    render_log_section("engine logs", &report.engine_logs, report.summary.has_engine_logs);
    render_log_section(
        "manifest logs",
        &report.manifest_logs,
        report.summary.has_manifest_logs,
    );

    println!("{} ({})", "failed tasks".bold(), report.failed_task_count);
    for task in &report.failed_tasks {
        println!("  {} {} - {}", task.task_id.red(), task.name, task.status_message);
        for line in task.logs.iter().rev().take(5).rev() {
            println!("      {}", line.dimmed());
        }
    }
    println!();

    println!("{}", "recommendations".bold());
    for rec in &report.recommendations {
        println!("  - {rec}");
    }
}

fn render_log_section(title: &str, lines: &[String], real: bool) {
    println!("{} ({})", title.bold(), lines.len());
    for line in lines.iter().rev().take(10).rev() {
        if real {
            println!("  {line}");
        } else {
            println!("  {}", line.yellow());
        }
    }
    println!();
}

pub fn render_analysis(report: &AnalysisReport) {
    println!(
        "{} {} of {} runs analyzed",
        "analysis".bold(),
        report.runs.len(),
        report.summary.total_runs
    );

    for run in &report.runs {
        let s = &run.summary.efficiency;
        println!();
        println!("{} {}", run.run_info.run_id.bold(), run.run_info.run_name);
        println!(
            "  tasks: {}  cpu efficiency: {:.1}%  memory efficiency: {:.1}%",
            s.total_tasks,
            s.overall_cpu_efficiency * 100.0,
            s.overall_memory_efficiency * 100.0
        );

        for task in &run.task_metrics {
            let flag = if task.efficiency.is_under_provisioned {
                "under".red().to_string()
            } else if task.efficiency.is_over_provisioned {
                "over".yellow().to_string()
            } else {
                "ok".green().to_string()
            };
            println!(
                "    {:<32} {:>6.1}% cpu {:>6.1}% mem  {}",
                task.task_name,
                task.efficiency.cpu_efficiency_ratio * 100.0,
                task.efficiency.memory_efficiency_ratio * 100.0,
                flag
            );
        }
    }

    if !report.skipped.is_empty() {
        println!();
        for err in &report.skipped {
            println!("{} {err}", "skipped:".yellow());
        }
    }
}

pub fn render_tasks(run_id: &str, tasks: &[TaskSummary], next_token: Option<&str>) {
    println!("{} {} ({} failed)", "run".bold(), run_id.bold(), tasks.len());
    for task in tasks {
        println!(
            "  {} {} - {}",
            task.task_id.red(),
            task.name,
            task.status_message.as_deref().unwrap_or("No status message")
        );
    }
    if next_token.is_some() {
        println!("{}", "more failed tasks available".dimmed());
    }
}
