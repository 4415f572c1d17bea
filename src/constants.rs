//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed limits of the filter model.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "SponsorLens";

/// Maximum number of seasons that can be selected in the year list at once.
pub const MAX_SELECTED_YEARS: usize = 5;

/// Size of the synthetic base population generated for a session.
pub const DEFAULT_RECORD_COUNT: usize = 200;

/// Seed used for the synthetic dataset when none is configured.
pub const DEFAULT_DATASET_SEED: u64 = 42;

/// First season covered by the synthetic dataset.
pub const DEFAULT_FIRST_YEAR: i32 = 2023;

/// Last season covered by the synthetic dataset.
pub const DEFAULT_LAST_YEAR: i32 = 2025;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SPONSORLENS_CONFIG_DIR";
