use crate::backend::BackendContext;
use crate::cli::print_json;
use crate::cli::render::render_tasks;
use crate::diagnose::preview_failed_tasks;
use crate::logging::OutputMode;
use anyhow::Result;

pub async fn run_failed_tasks(
    ctx: &BackendContext,
    run_id: &str,
    limit: u32,
    mode: OutputMode,
) -> Result<()> {
    let preview = preview_failed_tasks(ctx, run_id, limit).await?;

    match mode {
        OutputMode::Pretty => {
            render_tasks(run_id, &preview.tasks, preview.next_token.as_deref());
            Ok(())
        }
        OutputMode::Raw => print_json(&preview, false),
        OutputMode::Json => print_json(&preview, true),
    }
}
