pub mod analyze;
pub mod config;
pub mod diagnose;
pub mod logs;
mod render;
pub mod tasks;

use crate::backend::{BackendContext, InMemoryBackend, TelemetrySnapshot};
use crate::conf::EngineConfig;
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Build the backend context the commands run against.
///
/// `snapshot` overrides `[backend] snapshot` from the config.
pub fn build_context(cfg: &EngineConfig, snapshot: Option<&Path>) -> Result<BackendContext> {
    let Some(path) = snapshot.or(cfg.backend.snapshot.as_deref()) else {
        bail!("no telemetry snapshot configured: pass --snapshot or set [backend] snapshot");
    };

    let snapshot = TelemetrySnapshot::from_file(path)
        .with_context(|| format!("loading telemetry snapshot {}", path.display()))?;

    info!(
        path = %path.display(),
        runs = snapshot.runs.len(),
        streams = snapshot.streams.len(),
        "loaded telemetry snapshot"
    );

    let backend = Arc::new(InMemoryBackend::new(snapshot));
    Ok(BackendContext::from_config(cfg, backend.clone(), backend))
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
