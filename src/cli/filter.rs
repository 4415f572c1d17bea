//! One-shot filtering of the synthetic dataset.
//!
//! The `--…` flags mirror the dashboard's filter drawer; each flag is applied
//! through the same session operations the interactive `session` command uses.

use crate::cli::common::{load_config, print_json, start_session, CliResult};
use crate::constants::MAX_SELECTED_YEARS;
use crate::export::generate_report;
use crate::models::{CheckState, Dimension, GroupBy, Metric, RangePreset, YearToggle};
use crate::services::DashboardSession;
use chrono::NaiveDate;
use clap::Args;

/// Filter flags shared by `filter` and `export`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterSelection {
    /// Rightsholder to include (repeatable)
    #[arg(long = "rightsholder", value_name = "NAME")]
    pub rightsholders: Vec<String>,

    /// League whose rightsholders are all included (repeatable)
    #[arg(long = "league", value_name = "LEAGUE")]
    pub leagues: Vec<String>,

    /// Sponsor to include (repeatable)
    #[arg(long = "sponsor", value_name = "NAME")]
    pub sponsors: Vec<String>,

    /// Sponsor category whose sponsors are all included (repeatable)
    #[arg(long = "sponsor-category", value_name = "CATEGORY")]
    pub sponsor_categories: Vec<String>,

    /// Placement to include (repeatable)
    #[arg(long = "placement", value_name = "NAME")]
    pub placements: Vec<String>,

    /// Placement type to include (repeatable)
    #[arg(long = "placement-type", value_name = "NAME")]
    pub placement_types: Vec<String>,

    /// Platform to include (repeatable)
    #[arg(long = "platform", value_name = "NAME")]
    pub platforms: Vec<String>,

    /// Season to include (repeatable, at most 5)
    #[arg(long = "year", value_name = "YEAR", conflicts_with_all = ["from", "to", "last"])]
    pub years: Vec<i32>,

    /// Include every available season (up to 5)
    #[arg(long, conflicts_with_all = ["years", "from", "to", "last"])]
    pub all_years: bool,

    /// Range start (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "to")]
    pub from: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<NaiveDate>,

    /// Relative range ending today
    #[arg(long, value_name = "RANGE", conflicts_with_all = ["from", "to"])]
    pub last: Option<RangePreset>,

    /// Override the configured fallback season used when no time filter is given
    #[arg(long, value_name = "YEAR", conflicts_with = "no_fallback")]
    pub fallback_year: Option<i32>,

    /// Disable the configured fallback season
    #[arg(long)]
    pub no_fallback: bool,

    /// Grouping for top performers
    #[arg(long, value_name = "GROUP")]
    pub group_by: Option<GroupBy>,

    /// Metric top performers are ranked by
    #[arg(long, value_name = "METRIC")]
    pub metric: Option<Metric>,
}

impl FilterSelection {
    /// Starts a session from configuration and applies every flag to it.
    pub fn build_session(&self) -> CliResult<DashboardSession> {
        let mut config = load_config()?;
        if self.no_fallback {
            config.filters.temporal_fallback_year = None;
        } else if let Some(year) = self.fallback_year {
            config.filters.temporal_fallback_year = Some(year);
        }

        let mut session = start_session(&config)?;
        self.apply(&mut session)?;
        Ok(session)
    }

    /// Applies the flags to an existing session.
    pub fn apply(&self, session: &mut DashboardSession) -> CliResult<()> {
        for league in &self.leagues {
            ensure_selected(session, Dimension::Rightsholders, league)?;
        }
        for category in &self.sponsor_categories {
            ensure_selected(session, Dimension::Sponsors, category)?;
        }

        let flat = [
            (Dimension::Rightsholders, &self.rightsholders),
            (Dimension::Sponsors, &self.sponsors),
            (Dimension::Placements, &self.placements),
            (Dimension::PlacementTypes, &self.placement_types),
            (Dimension::Platforms, &self.platforms),
        ];
        for (dimension, values) in flat {
            for value in values {
                if !session.state().selection(dimension).contains(value) {
                    session.toggle(dimension, value)?;
                }
            }
        }

        for &year in &self.years {
            if session.state().time.has_year(year) {
                continue;
            }
            if session.toggle_year(year) == YearToggle::Rejected {
                eprintln!(
                    "Warning: season {year} ignored, a maximum of {MAX_SELECTED_YEARS} seasons can be selected"
                );
            }
        }

        if self.all_years {
            let dropped = session.select_all_years();
            if dropped > 0 {
                eprintln!(
                    "Warning: {dropped} older season(s) left out, a maximum of {MAX_SELECTED_YEARS} seasons can be selected"
                );
            }
        }

        if self.from.is_some() || self.to.is_some() {
            session.set_range(self.from, self.to)?;
        }
        if let Some(preset) = self.last {
            session.apply_range_preset(preset);
        }

        if let Some(group_by) = self.group_by {
            session.set_group_by(group_by);
        }
        if let Some(metric) = self.metric {
            session.set_ranking_metric(metric);
        }

        Ok(())
    }
}

/// Selects a whole category unless it is already fully selected.
fn ensure_selected(
    session: &mut DashboardSession,
    dimension: Dimension,
    category: &str,
) -> CliResult<()> {
    if session.category_state(dimension, category, None)? != CheckState::Checked {
        session.toggle_category(dimension, category, None)?;
    }
    Ok(())
}

/// Filter the dataset and print the result
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Filter flags
    #[command(flatten)]
    pub selection: FilterSelection,

    /// Maximum number of record rows in the text report
    #[arg(long, default_value = "20", value_name = "N")]
    pub rows: usize,

    /// Print only the number of matching records
    #[arg(long, conflicts_with = "json")]
    pub count: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl FilterArgs {
    /// Execute the filter command
    pub fn execute(&self) -> CliResult<()> {
        let session = self.selection.build_session()?;
        let view = session.view();

        if self.count {
            println!("{}", view.records.len());
        } else if self.json {
            print_json(&view)?;
        } else {
            print!(
                "{}",
                generate_report(&view, session.state().group_by, self.rows)
            );
        }

        Ok(())
    }
}
