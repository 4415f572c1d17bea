//! Shared test fixtures for library and CLI tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use sponsorlens::models::{Catalog, Record};
use sponsorlens::services::{DashboardSession, FilterEngine, MockInsightGenerator, TemporalFallback};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Builds a record with zeroed metrics.
pub fn record(id: u32, date: &str, rightsholder: &str, sponsor: &str, placement: &str) -> Record {
    Record {
        id,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        rightsholder: rightsholder.to_string(),
        sponsor: sponsor.to_string(),
        placement: placement.to_string(),
        placement_type: "LED Board".to_string(),
        platform: "Instagram".to_string(),
        smv: 10.0,
        fmv: 8.0,
        impressions: 1_000,
        views: 250,
        video_views: 100,
    }
}

/// A small population spread across three seasons and several dimensions.
pub fn sample_records() -> Vec<Record> {
    let mut records = vec![
        record(1, "2023-03-01", "Lakers", "Nike", "Jersey Patch"),
        record(2, "2023-09-15", "Cowboys", "Adidas", "Field Signage"),
        record(3, "2024-01-10", "Lakers", "Coca-Cola", "Court Signage"),
        record(4, "2024-06-20", "Celtics", "Nike", "Social Post"),
        record(5, "2025-02-02", "Yankees", "Visa", "Scoreboard"),
        record(6, "2025-07-04", "Chiefs", "Nike", "Broadcast Segment"),
    ];
    records[3].platform = "TikTok".to_string();
    records[4].placement_type = "Feed Post".to_string();
    records[5].smv = 40.0;
    records
}

/// Session over `records` with a fixed insight seed and a pinned "today".
pub fn session_with(records: Vec<Record>, fallback: TemporalFallback) -> DashboardSession {
    DashboardSession::with_records(
        Catalog::standard(),
        records,
        FilterEngine::new(fallback),
        Box::new(MockInsightGenerator::from_seed(5)),
    )
    .with_today(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap())
}

/// Path to the sponsorlens binary.
pub fn sponsorlens_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sponsorlens")
}

/// Creates a temporary config directory, optionally seeded with `config.toml`.
pub fn temp_config_dir(config_toml: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    if let Some(content) = config_toml {
        fs::write(dir.path().join("config.toml"), content).unwrap();
    }
    dir
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(sponsorlens_bin());
    cmd.env("SPONSORLENS_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Runs the binary with an isolated config directory.
pub fn run(args: &[&str], config_dir: &Path) -> Output {
    isolated_command(args, config_dir)
        .output()
        .expect("Failed to execute command")
}

/// Runs a session script read from a file.
pub fn run_script(script: &str, config_dir: &Path, extra: &[&str]) -> Output {
    let script_path: PathBuf = config_dir.join("script.txt");
    fs::write(&script_path, script).unwrap();

    let mut args = vec!["session", "--script", script_path.to_str().unwrap()];
    args.extend_from_slice(extra);
    run(&args, config_dir)
}

/// Stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
