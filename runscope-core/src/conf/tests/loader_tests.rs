use crate::conf::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn no_file_means_defaults() {
    let cfg = load_config_with_env(None, no_env).unwrap();

    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.region, "us-east-1");
    assert_eq!(cfg.log_group, "/aws/omics/WorkflowLog");
    assert_eq!(cfg.diagnose.log_page_size, 100);
    assert_eq!(cfg.diagnose.preview_limit, 10);
    assert_eq!(cfg.analyze.manifest_page_size, 1000);
    assert!(cfg.analyze.include_instructions);
    assert!(!cfg.analyze.strict);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("runscope.toml");
    fs::write(
        &path,
        r#"
region = "eu-west-1"

[diagnose]
task_log_concurrency = 4

[analyze]
strict = true

[backend]
snapshot = "captures/run.json"
"#,
    )
    .unwrap();

    // Act
    let cfg = load_config_with_env(Some(&path), no_env).unwrap();

    // Assert
    assert_eq!(cfg.region, "eu-west-1");
    assert_eq!(cfg.log_group, DEFAULT_LOG_GROUP);
    assert_eq!(cfg.diagnose.task_log_concurrency, 4);
    assert_eq!(cfg.diagnose.task_page_size, 100);
    assert!(cfg.analyze.strict);
    assert_eq!(cfg.backend.snapshot, Some(PathBuf::from("captures/run.json")));
    assert_eq!(cfg.diagnose_options().task_log_concurrency, 4);
    assert!(cfg.analyze_options().strict);
}

#[test]
fn environment_overrides_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("runscope.toml");
    fs::write(&path, "region = \"eu-west-1\"\n").unwrap();

    let cfg = load_config_with_env(Some(&path), |key| match key {
        ENV_REGION => Some("ap-southeast-2".to_string()),
        ENV_LOG_GROUP => Some("/custom/group".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(cfg.region, "ap-southeast-2");
    assert_eq!(cfg.log_group, "/custom/group");
}

#[test]
fn blank_environment_values_are_ignored() {
    let cfg = load_config_with_env(None, |_| Some("  ".to_string())).unwrap();
    assert_eq!(cfg.region, DEFAULT_REGION);
}

#[test]
fn missing_file_is_a_read_error_naming_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = load_config_with_env(Some(&path), no_env).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn unknown_keys_are_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("runscope.toml");
    fs::write(&path, "[diagnose]\npage_sise = 10\n").unwrap();

    let err = load_config_with_env(Some(&path), no_env).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn out_of_range_values_name_the_field() {
    let cases = [
        ("[diagnose]\nlog_page_size = 0\n", "diagnose.log_page_size"),
        ("[diagnose]\nlog_page_size = 10001\n", "diagnose.log_page_size"),
        ("[diagnose]\ntask_page_size = 101\n", "diagnose.task_page_size"),
        ("[diagnose]\ntask_log_concurrency = 0\n", "diagnose.task_log_concurrency"),
        ("[analyze]\nmanifest_page_size = 0\n", "analyze.manifest_page_size"),
        ("log_group = \"\"\n", "log_group"),
    ];

    for (toml, expected) in cases {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runscope.toml");
        fs::write(&path, toml).unwrap();

        let err = load_config_with_env(Some(&path), no_env).unwrap_err();

        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, expected, "case {toml:?}"),
            other => panic!("expected validation error for {toml:?}, got {other}"),
        }
    }
}
