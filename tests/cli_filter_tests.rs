//! End-to-end tests for `sponsorlens filter` and `sponsorlens catalog`.

mod fixtures;
use fixtures::*;

#[test]
fn test_filter_count_unfiltered() {
    let config_dir = temp_config_dir(None);
    let output = run(&["filter", "--count"], config_dir.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        stderr(&output)
    );
    assert_eq!(stdout(&output).trim(), "200");
}

#[test]
fn test_filter_respects_configured_fallback_year() {
    let config_dir = temp_config_dir(Some("[filters]\ntemporal_fallback_year = 2025\n"));

    let all = run(&["filter", "--json"], config_dir.path());
    assert_eq!(all.status.code(), Some(0), "stderr: {}", stderr(&all));
    let view: serde_json::Value = serde_json::from_str(&stdout(&all)).unwrap();
    let records = view["records"].as_array().unwrap();
    assert!(!records.is_empty());
    assert!(records.len() < 200);
    assert!(records
        .iter()
        .all(|r| r["date"].as_str().unwrap().starts_with("2025-")));

    let unrestricted = run(&["filter", "--count", "--no-fallback"], config_dir.path());
    assert_eq!(stdout(&unrestricted).trim(), "200");
}

#[test]
fn test_filter_json_by_sponsor_and_year() {
    let config_dir = temp_config_dir(None);
    let output = run(
        &["filter", "--sponsor", "Nike", "--year", "2024", "--json"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let view: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    for record in view["records"].as_array().unwrap() {
        assert_eq!(record["sponsor"], "Nike");
        assert!(record["date"].as_str().unwrap().starts_with("2024-"));
    }
    let summary: Vec<&str> = view["summary"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(summary, vec!["Years: 2024", "Sponsor: Nike"]);
    assert_eq!(
        view["isEmpty"].as_bool().unwrap(),
        view["records"].as_array().unwrap().is_empty()
    );
}

#[test]
fn test_filter_league_selects_whole_category() {
    let config_dir = temp_config_dir(None);
    let output = run(&["filter", "--league", "NBA", "--json"], config_dir.path());
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let view: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let nba = ["Lakers", "Celtics", "Warriors", "Knicks"];
    for record in view["records"].as_array().unwrap() {
        assert!(nba.contains(&record["rightsholder"].as_str().unwrap()));
    }
    assert_eq!(view["summary"][0], "4 Rightsholders Selected");
}

#[test]
fn test_filter_sixth_year_warns_and_is_ignored() {
    let config_dir = temp_config_dir(None);
    let output = run(
        &[
            "filter", "--year", "2020", "--year", "2021", "--year", "2022", "--year", "2023",
            "--year", "2024", "--year", "2025", "--json",
        ],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("maximum of 5 seasons"));

    let view: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(view["summary"][0], "Years: 2024, 2023, 2022, 2021, 2020");
}

#[test]
fn test_filter_inverted_range_fails_validation() {
    let config_dir = temp_config_dir(None);
    let output = run(
        &["filter", "--from", "2025-03-01", "--to", "2025-01-01"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("after end date"));
}

#[test]
fn test_filter_unknown_sponsor_fails_validation() {
    let config_dir = temp_config_dir(None);
    let output = run(&["filter", "--sponsor", "Acme"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not a valid sponsor"));
}

#[test]
fn test_filter_unknown_league_is_not_found() {
    let config_dir = temp_config_dir(None);
    let output = run(&["filter", "--league", "NHL"], config_dir.path());
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_filter_empty_result_report() {
    let config_dir = temp_config_dir(None);
    let output = run(&["filter", "--year", "1999"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No records match the current filters."));
}

#[test]
fn test_filter_text_report_sections() {
    let config_dir = temp_config_dir(None);
    let output = run(
        &["filter", "--sponsor-category", "Sportswear", "--group-by", "platform"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Active filters: 4 Sponsors Selected"));
    assert!(text.contains("Totals"));
    assert!(text.contains("Top performers (by Platform)"));
}

#[test]
fn test_catalog_lists_trees() {
    let config_dir = temp_config_dir(None);
    let output = run(&["catalog", "--dimension", "placement-types"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let text = stdout(&output);
    assert!(text.starts_with("Placement Types"));
    assert!(text.contains("  Venue"));
    assert!(text.contains("    Signage"));
    assert!(text.contains("      LED Board"));
}

#[test]
fn test_catalog_json_marks_free_form_dimensions() {
    let config_dir = temp_config_dir(None);
    let output = run(&["catalog", "--json"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let entries: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 10);

    let hashtags = entries
        .iter()
        .find(|e| e["dimension"] == "hashtags")
        .unwrap();
    assert_eq!(hashtags["freeForm"], true);

    let sponsors = entries
        .iter()
        .find(|e| e["dimension"] == "sponsors")
        .unwrap();
    assert!(sponsors["options"]
        .as_array()
        .unwrap()
        .iter()
        .any(|o| o == "Nike"));
}
