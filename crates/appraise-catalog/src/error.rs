//! Error types for the appraise-catalog crate.

use thiserror::Error;

/// Errors that can occur when loading or querying the modifier catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No catalog has been installed yet.
    #[error("modifier catalog is not loaded")]
    Unavailable,

    /// Two definitions share an id.
    #[error("duplicate modifier id in catalog: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// The catalog has no definitions.
    #[error("modifier catalog is empty")]
    EmptyCatalog,

    /// The catalog JSON could not be decoded.
    #[error("invalid catalog JSON: {0}")]
    InvalidSource(#[from] serde_json::Error),

    /// A matcher score bound is outside `(0, 1]`.
    #[error("matcher {name} must be in (0, 1], got {value}")]
    InvalidThreshold {
        /// Setting name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}
