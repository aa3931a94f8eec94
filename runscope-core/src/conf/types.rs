use crate::analysis::AnalyzeOptions;
use crate::diagnose::{DEFAULT_PREVIEW_LIMIT, DiagnoseOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_LOG_GROUP: &str = "/aws/omics/WorkflowLog";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub region: String,
    pub log_group: String,
    pub diagnose: DiagnoseConfig,
    pub analyze: AnalyzeConfig,
    pub backend: BackendConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            log_group: DEFAULT_LOG_GROUP.to_string(),
            diagnose: DiagnoseConfig::default(),
            analyze: AnalyzeConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnoseConfig {
    pub log_page_size: u32,
    pub task_page_size: u32,
    pub task_log_concurrency: usize,
    pub preview_limit: u32,
}

impl Default for DiagnoseConfig {
    fn default() -> Self {
        Self {
            log_page_size: 100,
            task_page_size: 100,
            task_log_concurrency: 1,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzeConfig {
    pub manifest_page_size: u32,
    pub include_instructions: bool,
    pub strict: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            manifest_page_size: 1000,
            include_instructions: true,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// JSON telemetry snapshot served by the in-memory backend.
    pub snapshot: Option<PathBuf>,
}

impl EngineConfig {
    pub fn diagnose_options(&self) -> DiagnoseOptions {
        DiagnoseOptions {
            log_page_size: self.diagnose.log_page_size,
            task_page_size: self.diagnose.task_page_size,
            task_log_concurrency: self.diagnose.task_log_concurrency,
        }
    }

    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            include_instructions: self.analyze.include_instructions,
            strict: self.analyze.strict,
            manifest_page_size: self.analyze.manifest_page_size,
        }
    }
}
