//! Error types for query building.

use appraise_catalog::CatalogError;
use thiserror::Error;

/// Reasons a search query could not be built.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The text had no item class, rarity or modifier lines.
    #[error("could not recognize any item fields in the text")]
    UnparseableHeader,

    /// None of the item's modifier lines matched a catalog modifier.
    #[error("none of the {} modifier lines matched a known modifier", lines.len())]
    NoMatchableStats {
        /// The lines that were tried.
        lines: Vec<String>,
    },

    /// No modifier catalog is loaded.
    #[error("modifier catalog is not loaded")]
    CatalogUnavailable,

    /// The item class has no category mapping and strict categories are enabled.
    #[error("item class \"{class}\" is not supported")]
    UnsupportedItemClass {
        /// The unmapped item class label.
        class: String,
    },

    /// Catalog failure other than unavailability.
    #[error(transparent)]
    Catalog(CatalogError),
}

impl From<CatalogError> for QueryError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unavailable => Self::CatalogUnavailable,
            other => Self::Catalog(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_catalog_maps_to_its_own_kind() {
        let err = QueryError::from(CatalogError::Unavailable);
        assert!(matches!(err, QueryError::CatalogUnavailable));

        let err = QueryError::from(CatalogError::EmptyCatalog);
        assert!(matches!(err, QueryError::Catalog(CatalogError::EmptyCatalog)));
    }

    #[test]
    fn no_matchable_stats_message_counts_lines() {
        let err = QueryError::NoMatchableStats {
            lines: vec!["a 1".into(), "b 2".into()],
        };
        assert_eq!(
            err.to_string(),
            "none of the 2 modifier lines matched a known modifier"
        );
    }
}
