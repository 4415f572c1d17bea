//! End-to-end tests for `sponsorlens config` commands.

use std::fs;

mod fixtures;
use fixtures::*;

#[test]
fn test_config_show_default() {
    let config_dir = temp_config_dir(None);
    let output = run(&["config", "show"], config_dir.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        stderr(&output)
    );
    let text = stdout(&output);
    assert!(text.contains("Records:        200"));
    assert!(text.contains("Fallback year:  (none)"));
}

#[test]
fn test_config_show_json_format() {
    let config_dir = temp_config_dir(None);
    let output = run(&["config", "show", "--json"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("Should parse JSON output");
    assert!(result["dataset"].is_object(), "Should have dataset object");
    assert_eq!(result["dataset"]["seed"], 42);
    assert!(result["filters"]["temporal_fallback_year"].is_null());
    assert!(result["path"].as_str().unwrap().ends_with("config.toml"));
}

#[test]
fn test_config_set_persists_values() {
    let config_dir = temp_config_dir(None);
    let output = run(
        &[
            "config",
            "set",
            "--fallback-year",
            "2025",
            "--records",
            "50",
            "--group-by",
            "platform",
        ],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(config_dir.path().join("config.toml").exists());

    let content = fs::read_to_string(config_dir.path().join("config.toml")).unwrap();
    assert!(content.contains("temporal_fallback_year = 2025"));

    let count = run(&["filter", "--count", "--no-fallback"], config_dir.path());
    assert_eq!(stdout(&count).trim(), "50");

    // Clearing the fallback removes the restriction
    run(&["config", "set", "--no-fallback"], config_dir.path());
    let output = run(&["config", "show", "--json"], config_dir.path());
    let result: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(result["filters"]["temporal_fallback_year"].is_null());
    assert_eq!(result["filters"]["default_group_by"], "platform");
}

#[test]
fn test_config_set_requires_an_option() {
    let config_dir = temp_config_dir(None);
    let output = run(&["config", "set"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("At least one configuration option"));
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let config_dir = temp_config_dir(None);
    let output = run(&["config", "set", "--records", "0"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_invalid_config_file_is_io_error() {
    let config_dir = temp_config_dir(Some("[dataset]\nrecord_count = \"many\"\n"));
    let output = run(&["filter", "--count"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to load configuration"));
}

#[test]
fn test_config_path_honours_env_override() {
    let config_dir = temp_config_dir(None);
    let output = run(&["config", "path"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output).trim(),
        config_dir.path().join("config.toml").display().to_string()
    );
}
