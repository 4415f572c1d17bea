//! Named filter presets.

use crate::error::{DashboardError, DashboardResult};
use crate::models::FilterState;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length of a preset name, in characters.
pub const MAX_PRESET_NAME_LEN: usize = 80;

/// Fixed set of preset categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum PresetCategory {
    /// Uncategorized presets
    #[default]
    General,
    /// Sponsor-focused views
    Sponsors,
    /// Rightsholder-focused views
    Rightsholders,
    /// Placement-focused views
    Placements,
    /// Season comparisons
    Seasonal,
    /// Campaign reporting
    Campaigns,
}

impl PresetCategory {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Sponsors => "Sponsors",
            Self::Rightsholders => "Rightsholders",
            Self::Placements => "Placements",
            Self::Seasonal => "Seasonal",
            Self::Campaigns => "Campaigns",
        }
    }
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-supplied fields of a preset, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresetDraft {
    /// Preset name (required, trimmed before storing)
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Preset category
    pub category: PresetCategory,
}

impl PresetDraft {
    /// Creates a draft in the default category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: PresetCategory::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: PresetCategory) -> Self {
        self.category = category;
        self
    }

    /// Normalizes and validates the draft.
    ///
    /// Whitespace-only names and descriptions are treated as missing.
    pub(crate) fn normalized(&self) -> DashboardResult<(String, Option<String>)> {
        let name = self.name.trim();
        validate_name(name)?;

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok((name.to_string(), description))
    }
}

/// Validates a preset name.
pub(crate) fn validate_name(name: &str) -> DashboardResult<()> {
    if name.trim().is_empty() {
        return Err(DashboardError::validation("Preset name cannot be empty"));
    }

    let len = name.chars().count();
    if len > MAX_PRESET_NAME_LEN {
        return Err(DashboardError::validation(format!(
            "Preset name exceeds maximum length of {MAX_PRESET_NAME_LEN} characters (got {len})"
        )));
    }

    Ok(())
}

/// A named, stored snapshot of the full filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    /// Opaque unique identifier
    pub id: Uuid,
    /// Non-empty display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Preset category
    #[serde(default)]
    pub category: PresetCategory,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Stored filter snapshot
    pub filters: FilterState,
}

impl FilterPreset {
    /// Returns an independent copy of the stored filters.
    #[must_use]
    pub fn snapshot(&self) -> FilterState {
        self.filters.clone()
    }

    /// Case-insensitive substring match against name or category.
    ///
    /// Surrounding whitespace in `query` is ignored.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.category.label().to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(name: &str, category: PresetCategory) -> FilterPreset {
        FilterPreset {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            category,
            created_at: Utc::now(),
            filters: FilterState::new(),
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Q4 Focus").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(MAX_PRESET_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_draft_normalizes_whitespace() {
        let draft = PresetDraft::new("  Q4 Focus ").with_description("   ");
        let (name, description) = draft.normalized().unwrap();
        assert_eq!(name, "Q4 Focus");
        assert_eq!(description, None);
    }

    #[test]
    fn test_matches_query_on_name_or_category() {
        let p = preset("Q4 Focus", PresetCategory::Seasonal);
        assert!(p.matches_query("q4"));
        assert!(p.matches_query("FOCUS"));
        assert!(p.matches_query("season"));
        assert!(p.matches_query(""));
        assert!(!p.matches_query("nike"));
    }

    #[test]
    fn test_unknown_category_rejected_on_load() {
        let json = r#"{"id":"7f1d3c4e-8a8b-4c3e-9c55-0c2f1f7f7a10","name":"X","category":"Bogus","createdAt":"2025-01-01T00:00:00Z","filters":{}}"#;
        assert!(serde_json::from_str::<FilterPreset>(json).is_err());
    }
}
