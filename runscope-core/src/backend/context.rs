use crate::backend::source::{LogSource, RunMetadataSource};
use crate::conf::EngineConfig;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Resolved backend handles for one top-level call.
///
/// Built once by the caller and passed by reference into every component, so
/// nothing below reads region or log group from the process environment.
#[derive(Clone)]
pub struct BackendContext {
    pub region: String,
    pub log_group: String,
    pub runs: Arc<dyn RunMetadataSource>,
    pub logs: Arc<dyn LogSource>,
}

impl BackendContext {
    pub fn new(
        region: impl Into<String>,
        log_group: impl Into<String>,
        runs: Arc<dyn RunMetadataSource>,
        logs: Arc<dyn LogSource>,
    ) -> Self {
        Self {
            region: region.into(),
            log_group: log_group.into(),
            runs,
            logs,
        }
    }

    pub fn from_config(
        cfg: &EngineConfig,
        runs: Arc<dyn RunMetadataSource>,
        logs: Arc<dyn LogSource>,
    ) -> Self {
        Self::new(cfg.region.clone(), cfg.log_group.clone(), runs, logs)
    }
}

impl Debug for BackendContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendContext")
            .field("region", &self.region)
            .field("log_group", &self.log_group)
            .finish_non_exhaustive()
    }
}
