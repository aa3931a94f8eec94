use crate::analysis::error::AnalysisError;
use crate::analysis::instructions::analysis_instructions;
use crate::analysis::types::{
    ANALYSIS_TYPE, AnalysisReport, AnalyzeOptions, BatchSummary, RunAnalysis, RunInfo, RunSummary,
};
use crate::backend::{BackendContext, RunDetails};
use crate::logs::{StreamKey, read_all};
use crate::manifest::{aggregate, scan_manifest};
use chrono::Utc;
use tracing::{debug, error, info, warn};

/// Build a resource-efficiency report over a batch of runs.
///
/// Each run is analyzed on its own. A run that cannot be analyzed is left
/// out of `runs` and kept in `skipped`; the batch only fails in strict mode
/// when runs were requested and none of them could be analyzed.
pub async fn analyze(
    ctx: &BackendContext,
    run_ids: &[String],
    opts: &AnalyzeOptions,
) -> Result<AnalysisReport, AnalysisError> {
    info!(runs = run_ids.len(), "analyzing runs");

    let mut outcomes = Vec::with_capacity(run_ids.len());
    for run_id in run_ids {
        outcomes.push(analyze_run(ctx, run_id, opts.manifest_page_size).await);
    }

    let (runs, skipped): (Vec<_>, Vec<_>) = outcomes.into_iter().partition(Result::is_ok);
    let runs: Vec<RunAnalysis> = runs.into_iter().filter_map(Result::ok).collect();
    let skipped: Vec<AnalysisError> = skipped.into_iter().filter_map(Result::err).collect();

    if opts.strict && !run_ids.is_empty() && runs.is_empty() {
        return Err(AnalysisError::NoRunsAnalyzed {
            requested: run_ids.len(),
        });
    }

    info!(
        requested = run_ids.len(),
        analyzed = runs.len(),
        skipped = skipped.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        runs,
        summary: BatchSummary {
            total_runs: run_ids.len(),
            analysis_timestamp: Utc::now(),
            analysis_type: ANALYSIS_TYPE,
        },
        analysis_instructions: opts.include_instructions.then(analysis_instructions),
        skipped,
    })
}

async fn analyze_run(
    ctx: &BackendContext,
    run_id: &str,
    manifest_page_size: u32,
) -> Result<RunAnalysis, AnalysisError> {
    debug!(run_id, "processing run");

    let run = ctx.runs.get_run(run_id).await.map_err(|source| {
        error!(run_id, error = %source, "failed to look up run");
        AnalysisError::RunLookup {
            run_id: run_id.to_string(),
            source,
        }
    })?;

    let Some(uuid) = run.uuid.clone() else {
        warn!(run_id, "no uuid for run, skipping manifest analysis");
        return Err(AnalysisError::MissingRunUuid {
            run_id: run_id.to_string(),
        });
    };

    let key = StreamKey::manifest(run_id, Some(uuid));
    let manifest = read_all(ctx, &key, manifest_page_size)
        .await
        .map_err(|source| {
            error!(run_id, error = %source, "failed to read manifest");
            AnalysisError::ManifestRead {
                run_id: run_id.to_string(),
                source,
            }
        })?;

    if manifest.events.is_empty() {
        warn!(run_id, "no manifest log events found");
        return Err(AnalysisError::EmptyManifest {
            run_id: run_id.to_string(),
        });
    }

    let scan = scan_manifest(manifest.events.iter().map(|e| e.message.as_str()));
    let efficiency = aggregate(&scan.tasks);

    debug!(
        run_id,
        tasks = scan.tasks.len(),
        skipped_lines = scan.skipped.total(),
        "parsed manifest"
    );

    Ok(RunAnalysis {
        run_info: run_info(run),
        run_details: scan.run_details,
        task_metrics: scan.tasks,
        summary: RunSummary {
            efficiency,
            manifest_log_count: manifest.events.len(),
            skipped_lines: scan.skipped,
        },
    })
}

fn run_info(run: RunDetails) -> RunInfo {
    RunInfo {
        run_id: run.id,
        run_name: run.name,
        status: run.status,
        workflow_id: run.workflow_id,
        creation_time: run.creation_time,
        start_time: run.start_time,
        stop_time: run.stop_time,
        run_output_uri: run.output_uri,
    }
}
