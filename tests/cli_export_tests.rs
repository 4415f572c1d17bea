//! End-to-end tests for `sponsorlens export`.

use std::fs;

mod fixtures;
use fixtures::*;

const HEADER: &str = "ID,Date,Rightsholder,Sponsor,Placement,Placement Type,Platform,SMV,FMV,Impressions,Views,Video Views,View Rate";

#[test]
fn test_export_to_stdout() {
    let config_dir = temp_config_dir(None);
    let output = run(&["export", "--platform", "TikTok"], config_dir.path());
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert!(lines.last().unwrap().starts_with("Total,"));
    for line in &lines[1..lines.len() - 1] {
        assert!(line.contains(",TikTok,"), "unexpected row: {line}");
    }
}

#[test]
fn test_export_to_file_matches_filter_count() {
    let config_dir = temp_config_dir(None);
    let out_path = config_dir.path().join("export.csv");

    let count = run(&["filter", "--count", "--sponsor", "Visa"], config_dir.path());
    let expected: usize = stdout(&count).trim().parse().unwrap();

    let output = run(
        &[
            "export",
            "--sponsor",
            "Visa",
            "--output",
            out_path.to_str().unwrap(),
        ],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains(&format!("Exported {expected} record(s)")));

    let content = fs::read_to_string(&out_path).unwrap();
    // header + rows + total
    assert_eq!(content.lines().count(), expected + 2);
}

#[test]
fn test_export_empty_selection_still_writes_header_and_total() {
    let config_dir = temp_config_dir(None);
    let output = run(&["export", "--year", "1999"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("Total,"));
}

#[test]
fn test_export_to_missing_directory_is_io_error() {
    let config_dir = temp_config_dir(None);
    let out_path = config_dir.path().join("missing").join("export.csv");
    let output = run(
        &["export", "--output", out_path.to_str().unwrap()],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}
