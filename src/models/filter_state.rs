//! The live filter configuration.

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Catalog, SelectionSet, TimeWindow};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Multi-select filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// Rightsholders (league → team tree)
    Rightsholders,
    /// Sponsors (category → brand tree)
    Sponsors,
    /// Placements (flat list)
    Placements,
    /// Placement types (venue/broadcast/social → subcategory → item tree)
    PlacementTypes,
    /// Platforms (flat list)
    Platforms,
    /// Account types (flat list)
    AccountTypes,
    /// Media types (flat list)
    MediaTypes,
    /// Collections (free-form)
    Collections,
    /// Hashtags (free-form)
    Hashtags,
    /// Handles (free-form)
    Handles,
}

impl Dimension {
    /// Every dimension, in badge order.
    pub const ALL: [Self; 10] = [
        Self::Rightsholders,
        Self::Sponsors,
        Self::Placements,
        Self::PlacementTypes,
        Self::Platforms,
        Self::AccountTypes,
        Self::MediaTypes,
        Self::Collections,
        Self::Hashtags,
        Self::Handles,
    ];

    /// Singular and plural display nouns.
    #[must_use]
    pub const fn nouns(self) -> (&'static str, &'static str) {
        match self {
            Self::Rightsholders => ("Rightsholder", "Rightsholders"),
            Self::Sponsors => ("Sponsor", "Sponsors"),
            Self::Placements => ("Placement", "Placements"),
            Self::PlacementTypes => ("Placement Type", "Placement Types"),
            Self::Platforms => ("Platform", "Platforms"),
            Self::AccountTypes => ("Account Type", "Account Types"),
            Self::MediaTypes => ("Media Type", "Media Types"),
            Self::Collections => ("Collection", "Collections"),
            Self::Hashtags => ("Hashtag", "Hashtags"),
            Self::Handles => ("Handle", "Handles"),
        }
    }
}

/// Single-choice grouping used by breakdowns and top performers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum GroupBy {
    /// Group by rightsholder
    Rightsholder,
    /// Group by sponsor
    #[default]
    Sponsor,
    /// Group by placement
    Placement,
    /// Group by placement type
    PlacementType,
    /// Group by platform
    Platform,
    /// Group by calendar month
    Month,
    /// Group by season
    Year,
}

/// Every filter dimension plus the temporal window and view settings.
///
/// Cloning produces a fully independent copy; presets store clones, so
/// later edits to the live state never reach a saved preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Selected rightsholders
    pub rightsholders: SelectionSet,
    /// Selected sponsors
    pub sponsors: SelectionSet,
    /// Selected placements
    pub placements: SelectionSet,
    /// Selected placement types
    pub placement_types: SelectionSet,
    /// Temporal window
    pub time: TimeWindow,
    /// Grouping for derived breakdowns
    pub group_by: GroupBy,
    /// Selected platforms
    pub platforms: SelectionSet,
    /// Selected account types
    pub account_types: SelectionSet,
    /// Selected media types
    pub media_types: SelectionSet,
    /// Selected collections
    pub collections: SelectionSet,
    /// Selected hashtags
    pub hashtags: SelectionSet,
    /// Selected handles
    pub handles: SelectionSet,
    comparison_date: Option<NaiveDate>,
}

impl FilterState {
    /// Creates an all-empty filter state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection backing a dimension.
    #[must_use]
    pub const fn selection(&self, dimension: Dimension) -> &SelectionSet {
        match dimension {
            Dimension::Rightsholders => &self.rightsholders,
            Dimension::Sponsors => &self.sponsors,
            Dimension::Placements => &self.placements,
            Dimension::PlacementTypes => &self.placement_types,
            Dimension::Platforms => &self.platforms,
            Dimension::AccountTypes => &self.account_types,
            Dimension::MediaTypes => &self.media_types,
            Dimension::Collections => &self.collections,
            Dimension::Hashtags => &self.hashtags,
            Dimension::Handles => &self.handles,
        }
    }

    /// Mutable selection backing a dimension.
    pub fn selection_mut(&mut self, dimension: Dimension) -> &mut SelectionSet {
        match dimension {
            Dimension::Rightsholders => &mut self.rightsholders,
            Dimension::Sponsors => &mut self.sponsors,
            Dimension::Placements => &mut self.placements,
            Dimension::PlacementTypes => &mut self.placement_types,
            Dimension::Platforms => &mut self.platforms,
            Dimension::AccountTypes => &mut self.account_types,
            Dimension::MediaTypes => &mut self.media_types,
            Dimension::Collections => &mut self.collections,
            Dimension::Hashtags => &mut self.hashtags,
            Dimension::Handles => &mut self.handles,
        }
    }

    /// The comparison date, if one is set.
    #[must_use]
    pub const fn comparison_date(&self) -> Option<NaiveDate> {
        self.comparison_date
    }

    /// Sets or clears the comparison date. Only one date is ever kept.
    pub fn set_comparison_date(&mut self, date: Option<NaiveDate>) {
        self.comparison_date = date;
    }

    /// Resets everything to the defaults ("Clear All").
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Returns true if no dimension, window or comparison date is set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|d| self.selection(*d).is_empty())
            && self.time.year_count() == 0
            && self.time.range() == (None, None)
            && self.comparison_date.is_none()
    }

    /// Checks every selection against the catalog and the window invariants.
    ///
    /// Used when a snapshot enters the process from outside (e.g. preset
    /// import); live edits are validated one action at a time instead.
    pub fn validate(&self, catalog: &Catalog) -> DashboardResult<()> {
        for dimension in Dimension::ALL {
            if let Some(unknown) = self
                .selection(dimension)
                .iter()
                .find(|v| !catalog.accepts(dimension, v))
            {
                return Err(DashboardError::validation(format!(
                    "'{unknown}' is not a valid {}",
                    dimension.nouns().0.to_lowercase()
                )));
            }
        }
        self.time.validate()
    }
}
