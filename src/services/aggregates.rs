//! Values derived from the filtered record set.
//!
//! Everything here is a pure function of the filter state and the records
//! it admitted; the session recomputes them after every change.

use crate::models::{Dimension, FilterState, GroupBy, Metric, Record, TimeFilterKind};
use serde::Serialize;
use std::collections::HashMap;

/// Column sums over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Number of records summed
    pub records: usize,
    /// Sum of SMV (thousands of dollars)
    pub smv: f64,
    /// Sum of FMV (thousands of dollars)
    pub fmv: f64,
    /// Sum of impressions
    pub impressions: u64,
    /// Sum of views
    pub views: u64,
    /// Sum of video views
    pub video_views: u64,
}

impl Totals {
    /// Sums every record.
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut totals = Self::default();
        for record in records {
            totals.add(record);
        }
        totals
    }

    /// Adds a single record.
    pub fn add(&mut self, record: &Record) {
        self.records += 1;
        self.smv += record.smv;
        self.fmv += record.fmv;
        self.impressions += record.impressions;
        self.views += record.views;
        self.video_views += record.video_views;
    }

    /// Reads a metric off the totals.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Smv => self.smv,
            Metric::Fmv => self.fmv,
            Metric::Impressions => self.impressions as f64,
            Metric::Views => self.views as f64,
            Metric::VideoViews => self.video_views as f64,
        }
    }

    /// Views as a percentage of impressions (0 when nothing was delivered).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn view_rate(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            self.views as f64 / self.impressions as f64 * 100.0
        }
    }
}

/// One row of a grouped breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    /// Group key (a sponsor name, a month, ...)
    pub key: String,
    /// Totals for the group
    pub totals: Totals,
}

/// Key of `record` under `group_by`.
#[must_use]
pub fn group_key(record: &Record, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::Rightsholder => record.rightsholder.clone(),
        GroupBy::Sponsor => record.sponsor.clone(),
        GroupBy::Placement => record.placement.clone(),
        GroupBy::PlacementType => record.placement_type.clone(),
        GroupBy::Platform => record.platform.clone(),
        GroupBy::Month => record.month_key(),
        GroupBy::Year => record.year().to_string(),
    }
}

/// Totals per group, largest `metric` first; ties are ordered by key.
#[must_use]
pub fn breakdown(records: &[Record], group_by: GroupBy, metric: Metric) -> Vec<GroupRow> {
    let mut groups: HashMap<String, Totals> = HashMap::new();
    for record in records {
        groups
            .entry(group_key(record, group_by))
            .or_default()
            .add(record);
    }

    let mut rows: Vec<GroupRow> = groups
        .into_iter()
        .map(|(key, totals)| GroupRow { key, totals })
        .collect();
    rows.sort_by(|a, b| {
        b.totals
            .metric(metric)
            .total_cmp(&a.totals.metric(metric))
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}

/// The `limit` best groups by `metric`.
#[must_use]
pub fn top_performers(
    records: &[Record],
    group_by: GroupBy,
    metric: Metric,
    limit: usize,
) -> Vec<GroupRow> {
    let mut rows = breakdown(records, group_by, metric);
    rows.truncate(limit);
    rows
}

/// Human-readable labels for every active filter.
///
/// Examples: `"Years: 2024, 2023"`, `"3 Sponsors Selected"`,
/// `"Sponsor: Nike"`.
#[must_use]
pub fn active_filter_summary(state: &FilterState) -> Vec<String> {
    let mut labels = Vec::new();

    match state.time.kind() {
        TimeFilterKind::YearList if state.time.year_count() > 0 => {
            let years: Vec<String> = state.time.years().map(|y| y.to_string()).collect();
            labels.push(format!("Years: {}", years.join(", ")));
        }
        TimeFilterKind::DateRange => match state.time.range() {
            (Some(from), Some(to)) => labels.push(format!("Date Range: {from} to {to}")),
            (Some(from), None) => labels.push(format!("From: {from}")),
            (None, Some(to)) => labels.push(format!("Until: {to}")),
            (None, None) => {}
        },
        TimeFilterKind::YearList => {}
    }

    for dimension in Dimension::ALL {
        let selection = state.selection(dimension);
        let (singular, plural) = dimension.nouns();
        match selection.len() {
            0 => {}
            1 => {
                if let Some(only) = selection.iter().next() {
                    labels.push(format!("{singular}: {only}"));
                }
            }
            n => labels.push(format!("{n} {plural} Selected")),
        }
    }

    if let Some(date) = state.comparison_date() {
        labels.push(format!("Compared To: {date}"));
    }

    labels
}
