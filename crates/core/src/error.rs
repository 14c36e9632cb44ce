//! Layout error model.

use thiserror::Error;

/// Result type used across the layout crates.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Layout-level error.
///
/// Only hard failures live here. A zone that could not be placed is not an
/// error; it is reported as an omission by the pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// An input failed validation (dimensions, cell size, malformed grid).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl LayoutError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
