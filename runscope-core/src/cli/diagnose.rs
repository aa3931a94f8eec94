use crate::backend::BackendContext;
use crate::cli::print_json;
use crate::cli::render::render_diagnosis;
use crate::diagnose::{DiagnoseOptions, Diagnosis, diagnose};
use crate::logging::OutputMode;
use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn run_diagnose(
    ctx: &BackendContext,
    run_id: &str,
    opts: &DiagnoseOptions,
    mode: OutputMode,
) -> Result<()> {
    let diagnosis = diagnose(ctx, run_id, opts).await?;

    match (mode, &diagnosis) {
        (OutputMode::Pretty, Diagnosis::Failed(report)) => render_diagnosis(report),
        (OutputMode::Pretty, Diagnosis::NotFailed { message, .. }) => {
            println!("{}", message.yellow())
        }
        (OutputMode::Raw, _) => print_json(&diagnosis, false)?,
        (OutputMode::Json, _) => print_json(&diagnosis, true)?,
    }

    Ok(())
}
