use crate::analysis::{AnalyzeOptions, analyze, normalize_run_ids, render_analysis_prompt};
use crate::backend::BackendContext;
use crate::cli::print_json;
use crate::cli::render::render_analysis;
use crate::logging::OutputMode;
use anyhow::{Result, bail};

/// `inputs` may each be a single id, a comma separated list or a JSON array.
pub async fn run_analyze(
    ctx: &BackendContext,
    inputs: &[String],
    opts: &AnalyzeOptions,
    prompt: bool,
    mode: OutputMode,
) -> Result<()> {
    let run_ids: Vec<String> = inputs.iter().flat_map(|i| normalize_run_ids(i)).collect();
    if run_ids.is_empty() {
        bail!("no run ids given");
    }

    let report = analyze(ctx, &run_ids, opts).await?;

    if prompt {
        print!("{}", render_analysis_prompt(&report, &run_ids));
        return Ok(());
    }

    match mode {
        OutputMode::Pretty => {
            render_analysis(&report);
            Ok(())
        }
        OutputMode::Raw => print_json(&report, false),
        OutputMode::Json => print_json(&report, true),
    }
}
