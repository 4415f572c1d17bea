//! Error taxonomy for the filter core.
//!
//! Every failure here is local and recoverable: a rejected action leaves the
//! state it was applied to untouched.

/// Failures surfaced by filter, preset and insight operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Input was rejected before any state changed (e.g. an empty preset name).
    #[error("validation failed: {0}")]
    Validation(String),
    /// The referenced item no longer exists.
    #[error("not found: {0}")]
    NotFound(String),
    /// The request would cross a fixed limit (year cap, in-flight insight).
    #[error("limit reached: {0}")]
    Boundary(String),
}

impl DashboardError {
    /// Builds a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Builds a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Builds a boundary rejection.
    pub fn boundary(message: impl Into<String>) -> Self {
        Self::Boundary(message.into())
    }
}

/// Result alias for core operations.
pub type DashboardResult<T> = Result<T, DashboardError>;
