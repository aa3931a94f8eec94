mod error;
mod loader;
mod range;
mod types;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{
    ENV_LOG_GROUP, ENV_REGION, load_config, load_config_with_env, parse_config_file,
    validate_config,
};
pub use types::{
    AnalyzeConfig, BackendConfig, DEFAULT_LOG_GROUP, DEFAULT_REGION, DiagnoseConfig, EngineConfig,
};
