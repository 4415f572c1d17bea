//! Exposure records and the numeric metrics they carry.

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One synthetic sponsorship exposure event.
///
/// Records are immutable once generated; filtering only ever selects a
/// subset of them, preserving their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Sequential identifier within the generated population
    pub id: u32,
    /// Day the exposure happened
    pub date: NaiveDate,
    /// Team or property that owns the inventory (e.g., "Lakers")
    pub rightsholder: String,
    /// Brand receiving the exposure (e.g., "Nike")
    pub sponsor: String,
    /// Physical or digital asset (e.g., "Jersey Patch")
    pub placement: String,
    /// Placement type leaf from the placement-type tree (e.g., "LED Board")
    pub placement_type: String,
    /// Distribution platform (e.g., "Instagram")
    pub platform: String,
    /// Sponsorship media value, in thousands of dollars
    pub smv: f64,
    /// Fair market value, in thousands of dollars
    pub fmv: f64,
    /// Impressions delivered
    pub impressions: u64,
    /// Views delivered
    pub views: u64,
    /// Video views delivered
    pub video_views: u64,
}

impl Record {
    /// Calendar year (season) of the record.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month of the record as `YYYY-MM`.
    #[must_use]
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Reads a metric off the record as a float.
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
}

/// Numeric column used to rank and total records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Sponsorship media value
    #[default]
    Smv,
    /// Fair market value
    Fmv,
    /// Impressions
    Impressions,
    /// Views
    Views,
    /// Video views
    VideoViews,
}

impl Metric {
    /// Column label used in tables and exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Smv => "SMV",
            Self::Fmv => "FMV",
            Self::Impressions => "Impressions",
            Self::Views => "Views",
            Self::VideoViews => "Video Views",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            rightsholder: "Lakers".to_string(),
            sponsor: "Nike".to_string(),
            placement: "Jersey Patch".to_string(),
            placement_type: "LED Board".to_string(),
            platform: "Instagram".to_string(),
            smv: 12.5,
            fmv: 20.0,
            impressions: 1_000,
            views: 400,
            video_views: 90,
        }
    }

    #[test]
    fn test_year_and_month_key() {
        let record = sample();
        assert_eq!(record.year(), 2024);
        assert_eq!(record.month_key(), "2024-03");
    }

    #[test]
    fn test_metric_reads_matching_field() {
        let record = sample();
        assert!((record.metric(Metric::Smv) - 12.5).abs() < f64::EPSILON);
        assert!((record.metric(Metric::Impressions) - 1_000.0).abs() < f64::EPSILON);
        assert!((record.metric(Metric::VideoViews) - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["placementType"], "LED Board");
        assert_eq!(json["videoViews"], 90);
    }
}
