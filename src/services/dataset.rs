//! Synthetic exposure dataset.
//!
//! The population is generated in memory from a seed, so the same
//! configuration always yields the same records.

use crate::constants::{
    DEFAULT_DATASET_SEED, DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, DEFAULT_RECORD_COUNT,
};
use crate::models::{Catalog, Record};
use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for generating the base population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// RNG seed
    pub seed: u64,
    /// Number of records
    pub record_count: usize,
    /// First season (inclusive)
    pub first_year: i32,
    /// Last season (inclusive)
    pub last_year: i32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_DATASET_SEED,
            record_count: DEFAULT_RECORD_COUNT,
            first_year: DEFAULT_FIRST_YEAR,
            last_year: DEFAULT_LAST_YEAR,
        }
    }
}

impl DatasetConfig {
    /// Checks the configured bounds.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.record_count > 0, "record_count must be at least 1");
        ensure!(
            self.first_year <= self.last_year,
            "first_year ({}) must not be after last_year ({})",
            self.first_year,
            self.last_year
        );
        Ok(())
    }

    /// Seasons covered by the configuration, oldest first.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        (self.first_year..=self.last_year).collect()
    }
}

/// Generates the base population.
///
/// Records are sorted by date and numbered from 1 in that order.
pub fn generate(config: &DatasetConfig, catalog: &Catalog) -> Result<Vec<Record>> {
    config.validate()?;

    let rightsholders = catalog.rightsholders.all_leaves();
    let sponsors = catalog.sponsors.all_leaves();
    let placement_types = catalog.placement_types.all_leaves();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::with_capacity(config.record_count);

    for _ in 0..config.record_count {
        let year = rng.gen_range(config.first_year..=config.last_year);
        let date = random_day(&mut rng, year)?;

        let smv = round_to(rng.gen_range(5.0..250.0), 1);
        let fmv = round_to(smv * rng.gen_range(1.1..2.4), 1);
        let impressions: u64 = rng.gen_range(10_000..2_000_000);
        let views = scale(impressions, rng.gen_range(0.2..0.7));
        let video_views = scale(views, rng.gen_range(0.1..0.6));

        records.push(Record {
            id: 0,
            date,
            rightsholder: pick(&mut rng, &rightsholders)?,
            sponsor: pick(&mut rng, &sponsors)?,
            placement: pick(&mut rng, &catalog.placements)?,
            placement_type: pick(&mut rng, &placement_types)?,
            platform: pick(&mut rng, &catalog.platforms)?,
            smv,
            fmv,
            impressions,
            views,
            video_views,
        });
    }

    records.sort_by_key(|r| r.date);
    for (index, record) in records.iter_mut().enumerate() {
        record.id = u32::try_from(index + 1).context("record count exceeds u32 range")?;
    }

    debug!(
        count = records.len(),
        seed = config.seed,
        "generated synthetic dataset"
    );
    Ok(records)
}

/// Distinct seasons present in `records`, newest first.
#[must_use]
pub fn available_years(records: &[Record]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(Record::year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

fn random_day(rng: &mut StdRng, year: i32) -> Result<NaiveDate> {
    let days_in_year = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    };
    let ordinal = rng.gen_range(1..=days_in_year);
    NaiveDate::from_yo_opt(year, ordinal)
        .with_context(|| format!("invalid day {ordinal} of {year}"))
}

fn pick<S: AsRef<str>>(rng: &mut StdRng, options: &[S]) -> Result<String> {
    options
        .choose(rng)
        .map(|s| s.as_ref().to_string())
        .context("catalog dimension has no options")
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale(value: u64, factor: f64) -> u64 {
    (value as f64 * factor).round() as u64
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let catalog = Catalog::standard();
        let config = DatasetConfig::default();
        let a = generate(&config, &catalog).unwrap();
        let b = generate(&config, &catalog).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_RECORD_COUNT);
    }

    #[test]
    fn test_generate_respects_year_bounds_and_catalog() {
        let catalog = Catalog::standard();
        let records = generate(&DatasetConfig::default(), &catalog).unwrap();

        for record in &records {
            assert!((2023..=2025).contains(&record.year()));
            assert!(catalog.sponsors.contains_leaf(&record.sponsor));
            assert!(catalog.rightsholders.contains_leaf(&record.rightsholder));
            assert!(catalog.placement_types.contains_leaf(&record.placement_type));
            assert!(catalog.placements.contains(&record.placement));
            assert!(record.views <= record.impressions);
            assert!(record.video_views <= record.views);
        }
    }

    #[test]
    fn test_ids_follow_date_order() {
        let records = generate(&DatasetConfig::default(), &Catalog::standard()).unwrap();
        for pair in records.windows(2) {
            assert!(pair[0].date <= pair[1].date);
            assert_eq!(pair[0].id + 1, pair[1].id);
        }
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn test_available_years_newest_first() {
        let records = generate(&DatasetConfig::default(), &Catalog::standard()).unwrap();
        assert_eq!(available_years(&records), vec![2025, 2024, 2023]);
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let empty = DatasetConfig {
            record_count: 0,
            ..DatasetConfig::default()
        };
        assert!(empty.validate().is_err());

        let inverted = DatasetConfig {
            first_year: 2026,
            ..DatasetConfig::default()
        };
        assert!(generate(&inverted, &Catalog::standard()).is_err());
    }
}
