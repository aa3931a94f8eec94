use crate::conf::{ConfigError, load_config};
use crate::logging::OutputMode;
use anyhow::{Result, anyhow};
use owo_colors::OwoColorize;
use std::path::Path;

pub fn check(path: &Path, mode: OutputMode) -> Result<()> {
    match load_config(Some(path)) {
        Ok(cfg) => {
            match mode {
                OutputMode::Json => println!("{}", serde_json::to_string_pretty(&cfg)?),
                OutputMode::Raw | OutputMode::Pretty => {
                    println!("{} Config loaded successfully", "✔".green());
                    println!("{} region {}", "✔".green(), cfg.region);
                    println!("{} log group {}", "✔".green(), cfg.log_group);
                    match &cfg.backend.snapshot {
                        Some(snapshot) => {
                            println!("{} snapshot {}", "✔".green(), snapshot.display())
                        }
                        None => println!("{} no snapshot configured", "!".yellow()),
                    }
                }
            }
            Ok(())
        }
        Err(err) => {
            let hint = config_error_hint(&err);
            eprintln!("{}", err.red());
            if let Some(hint) = hint {
                eprintln!();
                eprintln!("{hint}");
            }
            Err(anyhow!("invalid configuration: {}", path.display()))
        }
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Config files are optional. Omit --config to run with defaults,\n\
             or point it at an existing TOML file.",
        ),

        ConfigError::Parse { .. } => Some(
            "Expected layout:\n\
             \n\
             region = \"us-east-1\"\n\
             log_group = \"/aws/omics/WorkflowLog\"\n\
             \n\
             [diagnose]\n\
             log_page_size = 100\n\
             \n\
             [analyze]\n\
             manifest_page_size = 1000\n\
             \n\
             [backend]\n\
             snapshot = \"snapshot.json\"",
        ),

        ConfigError::Invalid { field, .. } if field.ends_with("page_size") => Some(
            "Page sizes must be at least 1. Log pages allow up to 10000 events,\n\
             task pages up to 100 tasks.",
        ),

        ConfigError::Invalid { .. } => None,
    }
}
