//! Modifier catalog index and stat matching for appraise.
//!
//! Printed item modifiers ("+30 to Strength") are resolved to marketplace stat ids by
//! normalizing both the printed line and every catalog template to a canonical key, then
//! trying an exact key lookup before falling back to a fuzzy search.
//!
//! # Example
//!
//! ```
//! use appraise_catalog::{CatalogHandle, ModifierDefinition, resolve_line};
//! use appraise_config::MatcherSettings;
//!
//! let handle = CatalogHandle::with_definitions(
//!     vec![ModifierDefinition::new("explicit.stat_strength", "# to Strength", "Explicit")],
//!     &MatcherSettings::default(),
//! )
//! .unwrap();
//!
//! let index = handle.snapshot().unwrap();
//! let matched = resolve_line("+30 to Strength", &index).unwrap();
//! assert_eq!(matched.modifier_id, "explicit.stat_strength");
//! assert_eq!(matched.magnitude, 30.0);
//! ```

#![warn(missing_docs)]

mod definition;
mod error;
pub mod fuzzy;
mod handle;
mod index;
mod matcher;
mod normalize;
mod value;

pub use definition::{CatalogEntry, CatalogGroup, CatalogSource, ModifierDefinition};
pub use error::CatalogError;
pub use fuzzy::{Candidate, FuzzyIndex, FuzzyTuning, SubstringIndex, TermIndex};
pub use handle::CatalogHandle;
pub use index::CatalogIndex;
pub use matcher::{MatchKind, MatchResult, StatMatch, StatMatcher, resolve_line};
pub use normalize::{PLACEHOLDER, normalize};
pub use value::extract_value;

/// Decodes catalog JSON straight into definitions.
pub fn definitions_from_json(json: &str) -> Result<Vec<ModifierDefinition>, CatalogError> {
    Ok(CatalogSource::from_json(json)?.into_definitions())
}
