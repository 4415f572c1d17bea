//! SponsorLens Library
//!
//! This library provides the core of the SponsorLens analytics dashboard:
//! a synthetic exposure dataset, multi-dimensional filters with tri-state
//! category selection, named filter presets, and the aggregates derived
//! from the filtered records.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod services;

pub use error::{DashboardError, DashboardResult};
