//! A single analyst session: base records, live filters, presets, insights.
//!
//! Every mutation runs to completion before the next one starts, and every
//! derived value is recomputed from the current state on demand.

use crate::config::Config;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    Catalog, CheckState, Dimension, FilterPreset, FilterState, GroupBy, Metric, PresetDraft,
    RangePreset, Record, TimeFilterKind, YearToggle,
};
use crate::services::aggregates::{self, GroupRow, Totals};
use crate::services::dataset;
use crate::services::filter_engine::FilterEngine;
use crate::services::insights::{
    Insight, InsightGenerator, InsightPreview, InsightRunner, InsightTicket, MockInsightGenerator,
};
use crate::services::preset_store::PresetStore;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

/// Everything the display collaborators consume after a state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Records admitted by the live filters, in base order
    pub records: Vec<Record>,
    /// Active filter labels
    pub summary: Vec<String>,
    /// Column sums over `records`
    pub totals: Totals,
    /// Best groups under the live grouping
    pub top_performers: Vec<GroupRow>,
    /// True when no record matched; render an explicit empty state
    pub is_empty: bool,
}

/// Owns the state of one dashboard session.
pub struct DashboardSession {
    catalog: Catalog,
    records: Vec<Record>,
    state: FilterState,
    presets: PresetStore,
    engine: FilterEngine,
    insights: InsightRunner,
    generator: Box<dyn InsightGenerator>,
    ranking_metric: Metric,
    top_limit: usize,
    today: NaiveDate,
}

impl DashboardSession {
    /// Builds a session from configuration, generating the base records.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::standard();
        let records = dataset::generate(&config.dataset, &catalog)?;

        let generator: Box<dyn InsightGenerator> = match config.insights.seed {
            Some(seed) => Box::new(MockInsightGenerator::from_seed(seed)),
            None => Box::new(MockInsightGenerator::from_entropy()),
        };

        let mut session = Self::with_records(
            catalog,
            records,
            FilterEngine::new(config.filters.fallback()),
            generator,
        );
        session.top_limit = config.filters.top_performers;
        session.state.group_by = config.filters.default_group_by;

        info!(
            records = session.records.len(),
            fallback = ?session.engine.fallback(),
            "dashboard session started"
        );
        Ok(session)
    }

    /// Builds a session over an explicit record population.
    #[must_use]
    pub fn with_records(
        catalog: Catalog,
        records: Vec<Record>,
        engine: FilterEngine,
        generator: Box<dyn InsightGenerator>,
    ) -> Self {
        Self {
            catalog,
            records,
            state: FilterState::new(),
            presets: PresetStore::new(),
            engine,
            insights: InsightRunner::new(),
            generator,
            ranking_metric: Metric::default(),
            top_limit: 5,
            today: Local::now().date_naive(),
        }
    }

    /// Pins "today" for relative date ranges.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// The option catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The base population.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The live filter state.
    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    /// The preset store.
    #[must_use]
    pub const fn presets(&self) -> &PresetStore {
        &self.presets
    }

    /// The insight runner.
    #[must_use]
    pub const fn insights(&self) -> &InsightRunner {
        &self.insights
    }

    /// Seasons present in the base population, newest first.
    #[must_use]
    pub fn available_years(&self) -> Vec<i32> {
        dataset::available_years(&self.records)
    }

    /// Recomputes every derived value from the live state.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        let records = self.engine.apply(&self.records, &self.state);
        let totals = Totals::from_records(&records);
        let top_performers = aggregates::top_performers(
            &records,
            self.state.group_by,
            self.ranking_metric,
            self.top_limit,
        );

        DashboardView {
            is_empty: records.is_empty(),
            summary: aggregates::active_filter_summary(&self.state),
            totals,
            top_performers,
            records,
        }
    }

    // ------------------------------------------------------------------
    // Selections
    // ------------------------------------------------------------------

    /// Toggles one value of a dimension.
    ///
    /// Returns true if the value is selected afterwards.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) -> DashboardResult<bool> {
        self.check_member(dimension, value)?;
        let selected = self.state.selection_mut(dimension).toggle(value);
        debug!(?dimension, value, selected, "toggled filter value");
        Ok(selected)
    }

    /// Toggles a whole category (or subcategory) of a hierarchical dimension.
    pub fn toggle_category(
        &mut self,
        dimension: Dimension,
        category: &str,
        subcategory: Option<&str>,
    ) -> DashboardResult<CheckState> {
        let leaves: Vec<String> = self
            .group_leaves(dimension, category, subcategory)?
            .into_iter()
            .map(str::to_string)
            .collect();
        let state = self.state.selection_mut(dimension).toggle_category(&leaves);
        debug!(?dimension, category, ?subcategory, ?state, "toggled category");
        Ok(state)
    }

    /// Tri-state checkbox value of a category (or subcategory).
    pub fn category_state(
        &self,
        dimension: Dimension,
        category: &str,
        subcategory: Option<&str>,
    ) -> DashboardResult<CheckState> {
        let leaves = self.group_leaves(dimension, category, subcategory)?;
        Ok(self.state.selection(dimension).check_state(&leaves))
    }

    /// Selects every option of a catalog-backed dimension.
    pub fn select_all(&mut self, dimension: Dimension) -> DashboardResult<()> {
        let options: Vec<String> = self
            .catalog
            .options(dimension)
            .ok_or_else(|| {
                DashboardError::validation(format!(
                    "{} has no fixed option list",
                    dimension.nouns().1
                ))
            })?
            .into_iter()
            .map(str::to_string)
            .collect();
        self.state.selection_mut(dimension).select_all(&options);
        Ok(())
    }

    /// Clears one dimension.
    pub fn clear(&mut self, dimension: Dimension) {
        self.state.selection_mut(dimension).clear();
    }

    /// Resets every filter ("Clear All"), keeping the configured grouping.
    ///
    /// Also leaves preset edit mode.
    pub fn clear_all(&mut self) {
        let group_by = self.state.group_by;
        self.state.clear_all();
        self.presets.cancel_edit();
        self.state.group_by = group_by;
        info!("cleared all filters");
    }

    /// Sets the grouping used by derived breakdowns.
    pub fn set_group_by(&mut self, group_by: GroupBy) {
        self.state.group_by = group_by;
    }

    /// Sets the metric top performers are ranked by.
    pub fn set_ranking_metric(&mut self, metric: Metric) {
        self.ranking_metric = metric;
    }

    /// Sets or clears the comparison date.
    pub fn set_comparison_date(&mut self, date: Option<NaiveDate>) {
        self.state.set_comparison_date(date);
    }

    // ------------------------------------------------------------------
    // Time window
    // ------------------------------------------------------------------

    /// Switches the temporal mode.
    pub fn set_time_kind(&mut self, kind: TimeFilterKind) {
        self.state.time.set_kind(kind);
    }

    /// Toggles a season; a sixth year is rejected and logged.
    pub fn toggle_year(&mut self, year: i32) -> YearToggle {
        let outcome = self.state.time.toggle_year(year);
        if outcome == YearToggle::Rejected {
            info!(year, "season rejected, year list is full");
        }
        outcome
    }

    /// Selects every available season up to the cap.
    ///
    /// Returns the number of seasons left out by the cap.
    pub fn select_all_years(&mut self) -> usize {
        let available = self.available_years();
        self.state.time.select_all_years(&available)
    }

    /// Stores a date range and switches to range mode.
    pub fn set_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> DashboardResult<()> {
        self.state.time.set_range(from, to)?;
        self.state.time.set_kind(TimeFilterKind::DateRange);
        Ok(())
    }

    /// Applies a relative range ending today.
    pub fn apply_range_preset(&mut self, preset: RangePreset) {
        self.state.time.apply_preset(preset, self.today);
    }

    /// Clears both temporal modes.
    pub fn clear_time(&mut self) {
        self.state.time.clear();
    }

    // ------------------------------------------------------------------
    // Presets
    // ------------------------------------------------------------------

    /// Saves the live state as a preset (or updates the edited one).
    pub fn save_preset(&mut self, draft: &PresetDraft) -> DashboardResult<FilterPreset> {
        self.presets.save(draft, &self.state)
    }

    /// Replaces the live state with a copy of a preset's filters.
    ///
    /// Applying any preset other than the one being edited leaves edit mode.
    pub fn apply_preset(&mut self, id: Uuid) -> DashboardResult<()> {
        self.state = self.presets.apply(id)?;
        if self.presets.editing().is_some_and(|editing| editing != id) {
            self.presets.cancel_edit();
        }
        info!(id = %id, "applied filter preset");
        Ok(())
    }

    /// Loads a preset into the live state and enters edit mode for it.
    pub fn edit_preset(&mut self, id: Uuid) -> DashboardResult<()> {
        let filters = self.presets.begin_edit(id)?.snapshot();
        self.state = filters;
        Ok(())
    }

    /// Leaves preset edit mode.
    pub fn cancel_edit(&mut self) {
        self.presets.cancel_edit();
    }

    /// Deletes a preset; absent ids are ignored.
    pub fn delete_preset(&mut self, id: Uuid) -> bool {
        self.presets.delete(id)
    }

    /// Searches presets by name or category.
    #[must_use]
    pub fn search_presets(&self, query: &str) -> Vec<&FilterPreset> {
        self.presets.search(query)
    }

    /// Replaces the preset store with validated imported presets.
    pub fn import_presets(&mut self, json: &str) -> DashboardResult<usize> {
        self.presets = PresetStore::from_json(json, &self.catalog)?;
        Ok(self.presets.len())
    }

    // ------------------------------------------------------------------
    // Insights
    // ------------------------------------------------------------------

    /// Starts an insight request; rejected while another is pending.
    pub fn request_insight(&mut self, template_id: &str) -> DashboardResult<InsightTicket> {
        self.insights.submit(template_id)
    }

    /// Completes a pending request over the currently filtered records.
    pub fn finish_insight(&mut self, ticket: InsightTicket) -> DashboardResult<Insight> {
        let records = self.engine.apply(&self.records, &self.state);
        self.insights
            .complete(ticket, self.generator.as_mut(), &records)
    }

    /// Saves an insight with the live filters as its context.
    pub fn save_insight(&mut self, insight: Insight) -> Uuid {
        self.insights.save(insight, &self.state)
    }

    /// Preview value for a saved insight.
    pub fn preview_insight(&self, id: Uuid) -> DashboardResult<InsightPreview> {
        self.insights.preview(id)
    }

    fn check_member(&self, dimension: Dimension, value: &str) -> DashboardResult<()> {
        if self.catalog.accepts(dimension, value) {
            Ok(())
        } else {
            Err(DashboardError::validation(format!(
                "'{value}' is not a valid {}",
                dimension.nouns().0.to_lowercase()
            )))
        }
    }

    fn group_leaves(
        &self,
        dimension: Dimension,
        category: &str,
        subcategory: Option<&str>,
    ) -> DashboardResult<Vec<&str>> {
        let tree = self.catalog.tree(dimension).ok_or_else(|| {
            DashboardError::validation(format!("{} has no categories", dimension.nouns().1))
        })?;
        tree.group_leaves(category, subcategory).ok_or_else(|| {
            let name = subcategory.map_or_else(
                || category.to_string(),
                |sub| format!("{category} / {sub}"),
            );
            DashboardError::not_found(format!("{} category '{name}'", tree.name))
        })
    }
}
