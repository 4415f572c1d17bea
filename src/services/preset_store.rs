//! In-memory store of named filter presets.
//!
//! The store owns every preset; callers only ever receive borrows or
//! independent copies, so nothing outside can alias a stored snapshot.

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Catalog, FilterPreset, FilterState, PresetDraft};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

/// Ordered collection of presets with an optional edit target.
#[derive(Debug, Clone, Default)]
pub struct PresetStore {
    presets: Vec<FilterPreset>,
    editing: Option<Uuid>,
}

impl PresetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Presets in insertion order.
    #[must_use]
    pub fn presets(&self) -> &[FilterPreset] {
        &self.presets
    }

    /// Number of stored presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Returns true if no preset is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Looks up a preset by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&FilterPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Preset currently being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    /// Enters edit mode for `id`; the next [`save`](Self::save) updates it.
    pub fn begin_edit(&mut self, id: Uuid) -> DashboardResult<&FilterPreset> {
        let index = self.index_of(id)?;
        self.editing = Some(id);
        Ok(&self.presets[index])
    }

    /// Leaves edit mode without touching any preset.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Saves `state` under the draft's name.
    ///
    /// Outside edit mode this appends a new preset with a fresh id. In edit
    /// mode it updates the edited preset in place and leaves edit mode.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is empty or whitespace-only
    /// - `NotFound` if the edited preset was deleted meanwhile
    pub fn save(&mut self, draft: &PresetDraft, state: &FilterState) -> DashboardResult<FilterPreset> {
        if let Some(id) = self.editing {
            let result = self.update(id, draft, state);
            if !matches!(result, Err(DashboardError::Validation(_))) {
                self.editing = None;
            }
            return result;
        }

        let (name, description) = draft.normalized()?;
        let preset = FilterPreset {
            id: Uuid::new_v4(),
            name,
            description,
            category: draft.category,
            created_at: Utc::now(),
            filters: state.clone(),
        };

        info!(id = %preset.id, name = %preset.name, "saved filter preset");
        self.presets.push(preset.clone());
        Ok(preset)
    }

    /// Replaces the preset matching `id`, keeping its id and creation time.
    pub fn update(
        &mut self,
        id: Uuid,
        draft: &PresetDraft,
        state: &FilterState,
    ) -> DashboardResult<FilterPreset> {
        let index = self.index_of(id)?;
        let (name, description) = draft.normalized()?;

        let preset = &mut self.presets[index];
        preset.name = name;
        preset.description = description;
        preset.category = draft.category;
        preset.filters = state.clone();

        info!(id = %id, name = %preset.name, "updated filter preset");
        Ok(preset.clone())
    }

    /// Removes the preset matching `id`. Returns false if it was absent.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        let removed = self.presets.len() != before;

        if self.editing == Some(id) {
            self.editing = None;
        }
        if removed {
            info!(id = %id, "deleted filter preset");
        } else {
            debug!(id = %id, "delete ignored, preset not found");
        }
        removed
    }

    /// Returns a fresh copy of the stored filters to become the live state.
    pub fn apply(&self, id: Uuid) -> DashboardResult<FilterState> {
        self.get(id)
            .map(FilterPreset::snapshot)
            .ok_or_else(|| DashboardError::not_found(format!("preset {id}")))
    }

    /// Case-insensitive substring search over name or category.
    ///
    /// The query is trimmed first, so an empty or whitespace-only query
    /// returns every preset. Insertion order is preserved.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&FilterPreset> {
        self.presets
            .iter()
            .filter(|p| p.matches_query(query))
            .collect()
    }

    /// Serializes every preset as pretty JSON.
    pub fn to_json(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(&self.presets)
            .map_err(|e| DashboardError::validation(format!("failed to serialize presets: {e}")))
    }

    /// Loads presets from JSON, validating each against the catalog.
    ///
    /// The whole import is rejected if any preset is invalid or two presets
    /// share an id.
    pub fn from_json(json: &str, catalog: &Catalog) -> DashboardResult<Self> {
        let presets: Vec<FilterPreset> = serde_json::from_str(json)
            .map_err(|e| DashboardError::validation(format!("invalid preset data: {e}")))?;

        let mut seen = HashSet::new();
        for preset in &presets {
            crate::models::preset::validate_name(&preset.name)?;
            if !seen.insert(preset.id) {
                return Err(DashboardError::validation(format!(
                    "duplicate preset id {}",
                    preset.id
                )));
            }
            preset.filters.validate(catalog).map_err(|e| match e {
                DashboardError::Validation(msg) => {
                    DashboardError::validation(format!("preset '{}': {msg}", preset.name))
                }
                other => other,
            })?;
        }

        debug!(count = presets.len(), "loaded filter presets");
        Ok(Self {
            presets,
            editing: None,
        })
    }

    fn index_of(&self, id: Uuid) -> DashboardResult<usize> {
        self.presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DashboardError::not_found(format!("preset {id}")))
    }
}
