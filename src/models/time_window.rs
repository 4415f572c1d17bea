//! Temporal filter: an explicit date range or a list of seasons.

use crate::constants::MAX_SELECTED_YEARS;
use crate::error::{DashboardError, DashboardResult};
use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which temporal mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum TimeFilterKind {
    /// Filter by an inclusive `from..=to` date range
    DateRange,
    /// Filter by discrete seasons
    #[default]
    YearList,
}

/// Relative date ranges ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum RangePreset {
    /// Last 30 days
    #[value(name = "30d")]
    Last30Days,
    /// Last 90 days
    #[value(name = "90d")]
    Last90Days,
    /// Last 180 days
    #[value(name = "180d")]
    Last180Days,
    /// Last 365 days
    #[value(name = "365d")]
    Last365Days,
}

impl RangePreset {
    /// Length of the window in days.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Last30Days => 30,
            Self::Last90Days => 90,
            Self::Last180Days => 180,
            Self::Last365Days => 365,
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Last30Days => "Last 30 Days",
            Self::Last90Days => "Last 90 Days",
            Self::Last180Days => "Last 180 Days",
            Self::Last365Days => "Last 365 Days",
        }
    }
}

/// Outcome of toggling a single season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearToggle {
    /// The year is now selected
    Added,
    /// The year was deselected
    Removed,
    /// The year list was full; nothing changed
    Rejected,
}

/// Temporal filter state.
///
/// Both the range and the year list are kept while switching modes, so
/// switching back restores the previous selection. Only the explicit clear
/// operations discard them.
///
/// # Invariants
///
/// - `from <= to` when both bounds are present
/// - at most [`MAX_SELECTED_YEARS`] years are selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    kind: TimeFilterKind,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    years: BTreeSet<i32>,
}

impl TimeWindow {
    /// Creates an empty window in year-list mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active mode.
    #[must_use]
    pub const fn kind(&self) -> TimeFilterKind {
        self.kind
    }

    /// Switches mode without touching either mode's stored values.
    pub fn set_kind(&mut self, kind: TimeFilterKind) {
        self.kind = kind;
    }

    /// Stored range bounds.
    #[must_use]
    pub const fn range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.from, self.to)
    }

    /// Selected years, newest first.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().rev().copied()
    }

    /// Number of selected years.
    #[must_use]
    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    /// Returns true if `year` is selected.
    #[must_use]
    pub fn has_year(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    /// Adds or removes a season.
    ///
    /// Adding a sixth distinct year is rejected and leaves the list as is.
    pub fn toggle_year(&mut self, year: i32) -> YearToggle {
        if self.years.remove(&year) {
            return YearToggle::Removed;
        }
        if self.years.len() >= MAX_SELECTED_YEARS {
            return YearToggle::Rejected;
        }
        self.years.insert(year);
        YearToggle::Added
    }

    /// Selects every available year, newest first, up to the cap.
    ///
    /// Returns how many available years were left out by the cap.
    pub fn select_all_years(&mut self, available: &[i32]) -> usize {
        let mut distinct: Vec<i32> = available.to_vec();
        distinct.sort_unstable_by(|a, b| b.cmp(a));
        distinct.dedup();

        let dropped = distinct.len().saturating_sub(MAX_SELECTED_YEARS);
        self.years = distinct.into_iter().take(MAX_SELECTED_YEARS).collect();
        dropped
    }

    /// Deselects every year.
    pub fn clear_years(&mut self) {
        self.years.clear();
    }

    /// Stores a date range.
    ///
    /// An inverted range (`from > to`) is rejected and the previous range
    /// is kept.
    pub fn set_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> DashboardResult<()> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(DashboardError::validation(format!(
                    "start date {f} is after end date {t}"
                )));
            }
        }
        self.from = from;
        self.to = to;
        Ok(())
    }

    /// Applies a relative range ending on `today` and switches to range mode.
    pub fn apply_preset(&mut self, preset: RangePreset, today: NaiveDate) {
        self.from = Some(today - Duration::days(preset.days()));
        self.to = Some(today);
        self.kind = TimeFilterKind::DateRange;
    }

    /// Forgets the stored range.
    pub fn clear_range(&mut self) {
        self.from = None;
        self.to = None;
    }

    /// Forgets both modes' values; the active mode is kept.
    pub fn clear(&mut self) {
        self.clear_range();
        self.clear_years();
    }

    /// Evaluates the active mode against a date.
    ///
    /// Returns `None` when the active mode holds no usable selection: a
    /// range with a missing bound, or an empty year list.
    #[must_use]
    pub fn admits(&self, date: NaiveDate, year: i32) -> Option<bool> {
        match self.kind {
            TimeFilterKind::DateRange => match (self.from, self.to) {
                (Some(from), Some(to)) => Some(from <= date && date <= to),
                _ => None,
            },
            TimeFilterKind::YearList if !self.years.is_empty() => Some(self.years.contains(&year)),
            TimeFilterKind::YearList => None,
        }
    }

    /// Checks the invariants; used when snapshots come from outside.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.years.len() > MAX_SELECTED_YEARS {
            return Err(DashboardError::boundary(format!(
                "a maximum of {MAX_SELECTED_YEARS} seasons can be selected (got {})",
                self.years.len()
            )));
        }
        if let (Some(f), Some(t)) = (self.from, self.to) {
            if f > t {
                return Err(DashboardError::validation(format!(
                    "start date {f} is after end date {t}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sixth_year_is_rejected() {
        let mut window = TimeWindow::new();
        for year in 2020..2025 {
            assert_eq!(window.toggle_year(year), YearToggle::Added);
        }
        assert_eq!(window.toggle_year(2025), YearToggle::Rejected);
        assert_eq!(window.year_count(), 5);
        assert!(!window.has_year(2025));

        // Removing still works at the cap
        assert_eq!(window.toggle_year(2020), YearToggle::Removed);
        assert_eq!(window.toggle_year(2025), YearToggle::Added);
    }

    #[test]
    fn test_select_all_years_enforces_cap() {
        let mut window = TimeWindow::new();
        let dropped = window.select_all_years(&[2019, 2020, 2021, 2022, 2023, 2024, 2024]);
        assert_eq!(dropped, 1);
        assert_eq!(window.years().collect::<Vec<_>>(), vec![2024, 2023, 2022, 2021, 2020]);
    }

    #[test]
    fn test_inverted_range_rejected_and_previous_kept() {
        let mut window = TimeWindow::new();
        window
            .set_range(Some(date(2024, 1, 1)), Some(date(2024, 2, 1)))
            .unwrap();
        let err = window
            .set_range(Some(date(2024, 3, 1)), Some(date(2024, 2, 1)))
            .unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(window.range(), (Some(date(2024, 1, 1)), Some(date(2024, 2, 1))));
    }

    #[test]
    fn test_switching_modes_keeps_values() {
        let mut window = TimeWindow::new();
        window.toggle_year(2024);
        window.apply_preset(RangePreset::Last30Days, date(2024, 6, 30));
        assert_eq!(window.kind(), TimeFilterKind::DateRange);
        assert_eq!(window.range(), (Some(date(2024, 5, 31)), Some(date(2024, 6, 30))));

        window.set_kind(TimeFilterKind::YearList);
        assert!(window.has_year(2024));
        window.set_kind(TimeFilterKind::DateRange);
        assert!(window.range().0.is_some());
    }

    #[test]
    fn test_admits_by_mode() {
        let mut window = TimeWindow::new();
        assert_eq!(window.admits(date(2024, 1, 1), 2024), None);

        window.toggle_year(2024);
        assert_eq!(window.admits(date(2024, 1, 1), 2024), Some(true));
        assert_eq!(window.admits(date(2023, 1, 1), 2023), Some(false));

        window.set_kind(TimeFilterKind::DateRange);
        window.set_range(Some(date(2024, 1, 1)), None).unwrap();
        assert_eq!(window.admits(date(2024, 1, 1), 2024), None);

        window
            .set_range(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)))
            .unwrap();
        assert_eq!(window.admits(date(2024, 1, 31), 2024), Some(true));
        assert_eq!(window.admits(date(2024, 2, 1), 2024), Some(false));
    }

    #[test]
    fn test_clear_resets_both_modes() {
        let mut window = TimeWindow::new();
        window.toggle_year(2023);
        window.apply_preset(RangePreset::Last90Days, date(2024, 6, 30));
        window.clear();
        assert_eq!(window.year_count(), 0);
        assert_eq!(window.range(), (None, None));
    }
}
