//! Derives the filtered record set from a filter state.

use crate::models::{FilterState, Record};
use tracing::debug;

/// What the temporal predicate does when no window is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemporalFallback {
    /// No temporal selection means no temporal restriction
    #[default]
    Unrestricted,
    /// No temporal selection restricts to a single season
    Year(i32),
}

impl TemporalFallback {
    /// Builds the fallback from an optional configured year.
    #[must_use]
    pub const fn from_year(year: Option<i32>) -> Self {
        match year {
            Some(y) => Self::Year(y),
            None => Self::Unrestricted,
        }
    }

    const fn admits(self, year: i32) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Year(y) => y == year,
        }
    }
}

/// Pure filter over the base population.
///
/// Predicates are combined with AND across dimensions and OR within a
/// dimension, evaluated in this order:
///
/// 1. rightsholder
/// 2. sponsor
/// 3. placement
/// 4. placement type
/// 5. temporal window (or the configured fallback)
/// 6. platform
///
/// An empty selection never restricts its dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterEngine {
    fallback: TemporalFallback,
}

impl FilterEngine {
    /// Creates an engine with the given temporal fallback.
    #[must_use]
    pub const fn new(fallback: TemporalFallback) -> Self {
        Self { fallback }
    }

    /// The configured temporal fallback.
    #[must_use]
    pub const fn fallback(&self) -> TemporalFallback {
        self.fallback
    }

    /// Returns the records admitted by `state`, in input order.
    #[must_use]
    pub fn apply(&self, records: &[Record], state: &FilterState) -> Vec<Record> {
        let filtered: Vec<Record> = records
            .iter()
            .filter(|r| self.matches(r, state))
            .cloned()
            .collect();

        debug!(
            total = records.len(),
            matched = filtered.len(),
            "applied filters"
        );
        filtered
    }

    /// Evaluates every predicate against a single record.
    #[must_use]
    pub fn matches(&self, record: &Record, state: &FilterState) -> bool {
        state.rightsholders.admits(&record.rightsholder)
            && state.sponsors.admits(&record.sponsor)
            && state.placements.admits(&record.placement)
            && state.placement_types.admits(&record.placement_type)
            && self.admits_time(record, state)
            && state.platforms.admits(&record.platform)
    }

    fn admits_time(&self, record: &Record, state: &FilterState) -> bool {
        let year = record.year();
        state
            .time
            .admits(record.date, year)
            .unwrap_or_else(|| self.fallback.admits(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeFilterKind;
    use chrono::NaiveDate;

    fn record(id: u32, sponsor: &str, placement: &str, date: (i32, u32, u32)) -> Record {
        Record {
            id,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            rightsholder: "Lakers".to_string(),
            sponsor: sponsor.to_string(),
            placement: placement.to_string(),
            placement_type: "LED Board".to_string(),
            platform: "Instagram".to_string(),
            smv: 1.0,
            fmv: 2.0,
            impressions: 100,
            views: 50,
            video_views: 10,
        }
    }

    #[test]
    fn test_and_across_dimensions_or_within() {
        let records = vec![
            record(1, "Nike", "Jersey", (2024, 1, 1)),
            record(2, "Adidas", "Jersey", (2024, 1, 2)),
            record(3, "Nike", "Scoreboard", (2024, 1, 3)),
        ];
        let engine = FilterEngine::default();

        let mut state = FilterState::new();
        state.sponsors.insert("Nike");
        state.placements.insert("Jersey");
        let ids: Vec<u32> = engine.apply(&records, &state).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);

        state.sponsors.insert("Adidas");
        let ids: Vec<u32> = engine.apply(&records, &state).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);

        state.sponsors.clear();
        let ids: Vec<u32> = engine.apply(&records, &state).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_year_fallback_applies_only_without_window() {
        let records = vec![
            record(1, "Nike", "Jersey", (2023, 5, 1)),
            record(2, "Nike", "Jersey", (2025, 5, 1)),
        ];
        let engine = FilterEngine::new(TemporalFallback::Year(2025));
        let mut state = FilterState::new();
        assert_eq!(engine.apply(&records, &state).len(), 1);

        state.time.toggle_year(2023);
        let out = engine.apply(&records, &state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn test_half_open_range_falls_back() {
        let records = vec![
            record(1, "Nike", "Jersey", (2023, 5, 1)),
            record(2, "Nike", "Jersey", (2025, 5, 1)),
        ];
        let engine = FilterEngine::default();
        let mut state = FilterState::new();
        state.time.set_kind(TimeFilterKind::DateRange);
        state
            .time
            .set_range(NaiveDate::from_ymd_opt(2024, 1, 1), None)
            .unwrap();
        assert_eq!(engine.apply(&records, &state).len(), 2);

        state
            .time
            .set_range(
                NaiveDate::from_ymd_opt(2025, 5, 1),
                NaiveDate::from_ymd_opt(2025, 5, 1),
            )
            .unwrap();
        let out = engine.apply(&records, &state);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
    }

    #[test]
    fn test_apply_is_repeatable() {
        let records = vec![
            record(1, "Nike", "Jersey", (2024, 1, 1)),
            record(2, "Puma", "Jersey", (2024, 1, 2)),
        ];
        let engine = FilterEngine::default();
        let state = FilterState::new();
        assert_eq!(engine.apply(&records, &state), engine.apply(&records, &state));
    }

    #[test]
    fn test_fallback_from_year() {
        assert_eq!(TemporalFallback::from_year(None), TemporalFallback::Unrestricted);
        assert_eq!(TemporalFallback::from_year(Some(2025)), TemporalFallback::Year(2025));
    }
}
