use crate::conf::error::ConfigError;
use crate::conf::range::{
    LOG_PAGE_SIZE, MANIFEST_PAGE_SIZE, PREVIEW_LIMIT, TASK_LOG_CONCURRENCY, TASK_PAGE_SIZE,
};
use crate::conf::types::EngineConfig;
use std::fs;
use std::path::Path;

pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_LOG_GROUP: &str = "RUNSCOPE_LOG_GROUP";

/// Load, override from the process environment, then validate.
///
/// With no path the defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

pub fn load_config_with_env(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<EngineConfig, ConfigError> {
    let mut cfg = match path {
        Some(path) => parse_config_file(path)?,
        None => EngineConfig::default(),
    };

    apply_env_overrides(&mut cfg, env);
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn parse_config_file(path: &Path) -> Result<EngineConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&raw).map_err(|e| ConfigError::parse(path, e))
}

fn apply_env_overrides(cfg: &mut EngineConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(region) = env(ENV_REGION).filter(|v| !v.trim().is_empty()) {
        cfg.region = region;
    }
    if let Some(group) = env(ENV_LOG_GROUP).filter(|v| !v.trim().is_empty()) {
        cfg.log_group = group;
    }
}

pub fn validate_config(cfg: &EngineConfig) -> Result<(), ConfigError> {
    if cfg.region.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field: "region",
            reason: "must not be empty".to_string(),
        });
    }
    if cfg.log_group.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field: "log_group",
            reason: "must not be empty".to_string(),
        });
    }

    LOG_PAGE_SIZE.check(cfg.diagnose.log_page_size)?;
    TASK_PAGE_SIZE.check(cfg.diagnose.task_page_size)?;
    TASK_LOG_CONCURRENCY.check(cfg.diagnose.task_log_concurrency)?;
    PREVIEW_LIMIT.check(cfg.diagnose.preview_limit)?;
    MANIFEST_PAGE_SIZE.check(cfg.analyze.manifest_page_size)?;

    Ok(())
}
