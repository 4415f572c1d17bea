//! CLI command handlers for SponsorLens.
//!
//! This module provides headless, scriptable access to the dashboard's filter
//! engine, presets and derived views for automation and testing.

pub mod catalog;
pub mod common;
pub mod config;
pub mod export;
pub mod filter;
pub mod session;

// Re-export types used by main.rs and tests
pub use catalog::CatalogArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use filter::{FilterArgs, FilterSelection};
pub use session::SessionArgs;
