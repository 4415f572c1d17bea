//! Scripted dashboard session.
//!
//! Reads one command per line (from a file or stdin) and runs them in order
//! against a single in-memory session, so presets, edit mode and saved
//! insights persist between lines. Blank lines and `#` comments are skipped.

use crate::cli::common::{load_config, print_json, start_session, CliError, CliResult};
use crate::constants::MAX_SELECTED_YEARS;
use crate::export::generate_report;
use crate::models::{
    Dimension, FilterPreset, GroupBy, Metric, PresetCategory, PresetDraft, RangePreset,
    TimeFilterKind, YearToggle,
};
use crate::services::{DashboardSession, InsightTemplate};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Run a scripted dashboard session
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Script file (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Stop at the first failing line
    #[arg(long)]
    pub strict: bool,

    /// Import presets from a JSON file before running the script
    #[arg(long, value_name = "FILE")]
    pub presets: Option<PathBuf>,
}

/// One script line.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
struct ScriptLine {
    #[command(subcommand)]
    command: ScriptCommand,
}

#[derive(Debug, Subcommand)]
enum ScriptCommand {
    /// Toggle one value of a dimension
    Toggle {
        dimension: Dimension,
        value: String,
    },
    /// Toggle a whole category (or subcategory)
    Category {
        dimension: Dimension,
        category: String,
        #[arg(long)]
        sub: Option<String>,
    },
    /// Select every option of a dimension
    SelectAll { dimension: Dimension },
    /// Clear one dimension
    Clear { dimension: Dimension },
    /// Clear every filter
    ClearAll,
    /// Toggle a season
    Year { year: i32 },
    /// Select every available season (up to the cap)
    AllYears,
    /// Set a date range
    Range {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Apply a relative range ending today
    Last { preset: RangePreset },
    /// Switch the temporal mode
    Mode { kind: TimeFilterKind },
    /// Clear the temporal filter
    ClearTime,
    /// Set the grouping
    GroupBy { group_by: GroupBy },
    /// Set the ranking metric
    Metric { metric: Metric },
    /// Set (or clear, when omitted) the comparison date
    Compare { date: Option<NaiveDate> },
    /// Save the live filters as a preset
    Save {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "general")]
        category: PresetCategory,
    },
    /// Load a preset and enter edit mode
    Edit { preset: String },
    /// Leave edit mode
    CancelEdit,
    /// Apply a preset
    Apply { preset: String },
    /// Delete a preset
    Delete { preset: String },
    /// List presets, optionally filtered by a search query
    Presets { query: Option<String> },
    /// Print every preset as JSON
    ExportPresets,
    /// List insight templates
    Templates,
    /// Generate an insight from a template
    Insight {
        template: String,
        #[arg(long)]
        save: bool,
    },
    /// List saved insights
    Insights,
    /// Preview a saved insight (the latest one when no id is given)
    Preview { id: Option<Uuid> },
    /// Print the dashboard report
    Show {
        #[arg(long, default_value = "10")]
        rows: usize,
    },
    /// Print the active filter summary
    Summary,
    /// Print the number of matching records
    Count,
    /// Print the live filter state as JSON
    State,
}

impl SessionArgs {
    /// Execute the session command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut session = start_session(&config)?;

        if let Some(path) = &self.presets {
            let json = fs::read_to_string(path).map_err(|e| {
                CliError::io(format!("Failed to read presets {}: {e}", path.display()))
            })?;
            let count = session.import_presets(&json)?;
            debug!(count, "imported presets");
        }

        let lines = self.read_script()?;
        let mut failures = 0usize;

        for (index, line) in lines.iter().enumerate() {
            let line_no = index + 1;
            let tokens = match tokenize(line) {
                Ok(tokens) => tokens,
                Err(message) => {
                    let err = CliError::validation(format!("line {line_no}: {message}"));
                    if self.strict {
                        return Err(err);
                    }
                    eprintln!("Error: {err}");
                    failures += 1;
                    continue;
                }
            };
            if tokens.is_empty() {
                continue;
            }

            let result = ScriptLine::try_parse_from(&tokens)
                .map_err(|e| CliError::validation(first_line(&e.to_string())))
                .and_then(|parsed| run(&mut session, parsed.command));

            if let Err(err) = result {
                let err = CliError {
                    exit_code: err.exit_code,
                    message: format!("line {line_no}: {}", err.message),
                };
                if self.strict {
                    return Err(err);
                }
                eprintln!("Error: {err}");
                failures += 1;
            }
        }

        if failures > 0 {
            eprintln!("{failures} line(s) failed");
        }
        Ok(())
    }

    fn read_script(&self) -> CliResult<Vec<String>> {
        match &self.script {
            Some(path) => fs::read_to_string(path)
                .map(|content| content.lines().map(str::to_string).collect())
                .map_err(|e| {
                    CliError::io(format!("Failed to read script {}: {e}", path.display()))
                }),
            None => io::stdin()
                .lock()
                .lines()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CliError::io(format!("Failed to read stdin: {e}"))),
        }
    }
}

fn run(session: &mut DashboardSession, command: ScriptCommand) -> CliResult<()> {
    match command {
        ScriptCommand::Toggle { dimension, value } => {
            let selected = session.toggle(dimension, &value)?;
            println!("{value}: {}", if selected { "selected" } else { "deselected" });
        }
        ScriptCommand::Category {
            dimension,
            category,
            sub,
        } => {
            let state = session.toggle_category(dimension, &category, sub.as_deref())?;
            println!("{}: {state:?}", sub.as_deref().unwrap_or(&category));
        }
        ScriptCommand::SelectAll { dimension } => {
            session.select_all(dimension)?;
            println!(
                "{}: {} selected",
                dimension.nouns().1,
                session.state().selection(dimension).len()
            );
        }
        ScriptCommand::Clear { dimension } => {
            session.clear(dimension);
            println!("{}: cleared", dimension.nouns().1);
        }
        ScriptCommand::ClearAll => {
            session.clear_all();
            println!("All filters cleared");
        }
        ScriptCommand::Year { year } => match session.toggle_year(year) {
            YearToggle::Added => println!("Season {year}: selected"),
            YearToggle::Removed => println!("Season {year}: deselected"),
            YearToggle::Rejected => {
                return Err(CliError::validation(format!(
                    "season {year} ignored, a maximum of {MAX_SELECTED_YEARS} seasons can be selected"
                )));
            }
        },
        ScriptCommand::AllYears => {
            let dropped = session.select_all_years();
            println!("{} season(s) selected", session.state().time.year_count());
            if dropped > 0 {
                eprintln!(
                    "Warning: {dropped} older season(s) left out, a maximum of {MAX_SELECTED_YEARS} seasons can be selected"
                );
            }
        }
        ScriptCommand::Range { from, to } => {
            session.set_range(from, to)?;
            println!("Date range set");
        }
        ScriptCommand::Last { preset } => {
            session.apply_range_preset(preset);
            println!("Date range: {}", preset.label());
        }
        ScriptCommand::Mode { kind } => {
            session.set_time_kind(kind);
            println!("Time filter: {kind:?}");
        }
        ScriptCommand::ClearTime => {
            session.clear_time();
            println!("Time filter cleared");
        }
        ScriptCommand::GroupBy { group_by } => {
            session.set_group_by(group_by);
            println!("Group by: {group_by:?}");
        }
        ScriptCommand::Metric { metric } => {
            session.set_ranking_metric(metric);
            println!("Ranking metric: {}", metric.label());
        }
        ScriptCommand::Compare { date } => {
            session.set_comparison_date(date);
            match date {
                Some(date) => println!("Compared to: {date}"),
                None => println!("Comparison cleared"),
            }
        }
        ScriptCommand::Save {
            name,
            description,
            category,
        } => {
            let editing = session.presets().editing().is_some();
            let mut draft = PresetDraft::new(name).with_category(category);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            let preset = session.save_preset(&draft)?;
            let verb = if editing { "Updated" } else { "Saved" };
            println!("{verb} preset '{}' ({})", preset.name, preset.id);
        }
        ScriptCommand::Edit { preset } => {
            let id = resolve_preset(session, &preset)?;
            session.edit_preset(id)?;
            println!("Editing preset {id}");
        }
        ScriptCommand::CancelEdit => {
            session.cancel_edit();
            println!("Edit cancelled");
        }
        ScriptCommand::Apply { preset } => {
            let id = resolve_preset(session, &preset)?;
            session.apply_preset(id)?;
            println!("Applied preset {id}");
        }
        ScriptCommand::Delete { preset } => {
            // Unknown presets are ignored, matching the store's delete semantics.
            match resolve_preset(session, &preset) {
                Ok(id) => {
                    session.delete_preset(id);
                    println!("Deleted preset {id}");
                }
                Err(_) => println!("No preset '{preset}'"),
            }
        }
        ScriptCommand::Presets { query } => {
            let matches = session.search_presets(query.as_deref().unwrap_or(""));
            if matches.is_empty() {
                println!("No presets");
            }
            for preset in matches {
                print_preset(preset);
            }
        }
        ScriptCommand::ExportPresets => {
            println!("{}", session.presets().to_json()?);
        }
        ScriptCommand::Templates => {
            for template in InsightTemplate::gallery() {
                println!("{:<24} {}", template.id, template.title);
            }
        }
        ScriptCommand::Insight { template, save } => {
            let ticket = session.request_insight(&template)?;
            let insight = session.finish_insight(ticket)?;
            println!("{}", insight.title);
            println!("{}", insight.headline);
            for finding in &insight.findings {
                println!("  - {finding}");
            }
            if save {
                let id = session.save_insight(insight);
                println!("Saved insight {id}");
            }
        }
        ScriptCommand::Insights => {
            let saved = session.insights().saved();
            if saved.is_empty() {
                println!("No saved insights");
            }
            for preview in saved {
                println!("{}  {}", preview.insight.id, preview.insight.title);
            }
        }
        ScriptCommand::Preview { id } => {
            let id = match id {
                Some(id) => id,
                None => session
                    .insights()
                    .saved()
                    .last()
                    .map(|p| p.insight.id)
                    .ok_or_else(|| CliError::not_found("not found: no saved insights"))?,
            };
            print!("{}", session.preview_insight(id)?.render());
        }
        ScriptCommand::Show { rows } => {
            let view = session.view();
            print!("{}", generate_report(&view, session.state().group_by, rows));
        }
        ScriptCommand::Summary => {
            let summary = session.view().summary;
            if summary.is_empty() {
                println!("No active filters");
            } else {
                println!("{}", summary.join(" | "));
            }
        }
        ScriptCommand::Count => {
            println!("{}", session.view().records.len());
        }
        ScriptCommand::State => {
            print_json(session.state())?;
        }
    }

    Ok(())
}

/// Resolves a preset by id or by (case-insensitive) name.
fn resolve_preset(session: &DashboardSession, reference: &str) -> CliResult<Uuid> {
    if let Ok(id) = Uuid::parse_str(reference) {
        return Ok(id);
    }

    session
        .presets()
        .presets()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(reference.trim()))
        .map(|p| p.id)
        .ok_or_else(|| CliError::not_found(format!("not found: preset '{reference}'")))
}

fn print_preset(preset: &FilterPreset) {
    match &preset.description {
        Some(description) => println!(
            "{}  {} [{}] - {description}",
            preset.id, preset.name, preset.category
        ),
        None => println!("{}  {} [{}]", preset.id, preset.name, preset.category),
    }
}

fn first_line(message: &str) -> String {
    message
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}

/// Splits a script line into arguments with POSIX shell quoting.
///
/// An unquoted `#` at the start of a word begins a comment.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    shell_words::split(line).map_err(|e| e.to_string())
}
