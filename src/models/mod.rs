//! Data models for exposure records, category trees and filter state.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of the services that derive views from them.

pub mod catalog;
pub mod category;
pub mod filter_state;
pub mod preset;
pub mod record;
pub mod selection;
pub mod time_window;

// Re-export all model types
pub use catalog::Catalog;
pub use category::{Category, CategoryNode, CategoryTree, Subcategory};
pub use filter_state::{Dimension, FilterState, GroupBy};
pub use preset::{FilterPreset, PresetCategory, PresetDraft};
pub use record::{Metric, Record};
pub use selection::{CheckState, SelectionSet};
pub use time_window::{RangePreset, TimeFilterKind, TimeWindow, YearToggle};
