//! Service layer for business logic.
//!
//! This module contains the filter engine and the services that derive
//! views, manage presets and generate insights from the filter state.

pub mod aggregates;
pub mod dataset;
pub mod filter_engine;
pub mod insights;
pub mod preset_store;
pub mod session;

// Re-export commonly used types and functions
pub use aggregates::{active_filter_summary, GroupRow, Totals};
pub use dataset::DatasetConfig;
pub use filter_engine::{FilterEngine, TemporalFallback};
pub use insights::{
    Insight, InsightGenerator, InsightPreview, InsightRunner, InsightTemplate,
    MockInsightGenerator,
};
pub use preset_store::PresetStore;
pub use session::{DashboardSession, DashboardView};
