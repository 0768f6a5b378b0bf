//! Error types for core profile models.

use thiserror::Error;

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Core profile model errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A required builder field was not supplied.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Page index outside the pager range.
    #[error("Page index {index} out of range (page count {count})")]
    PageOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of pages in the model.
        count: usize,
    },
}
