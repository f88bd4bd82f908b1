//! Searchable modifier catalog.

use std::{collections::HashMap, fmt};

use appraise_config::MatcherSettings;
use tracing::info;

use crate::{
    CatalogError,
    definition::ModifierDefinition,
    fuzzy::{Candidate, FuzzyIndex, FuzzyTuning, build_index},
    normalize::normalize,
};

/// An immutable, fully built catalog index.
///
/// Holds every definition alongside its normalized key, an exact-key lookup table and a
/// fuzzy index over the keys. Built once per catalog load and never mutated; refreshing
/// builds a new one (see [`CatalogHandle`](crate::CatalogHandle)).
pub struct CatalogIndex {
    /// Definitions in catalog order.
    definitions: Vec<ModifierDefinition>,
    /// Normalized text of each definition, same order.
    keys: Vec<String>,
    /// Normalized key -> first definition with that key.
    exact: HashMap<String, usize>,
    /// Fuzzy index over `keys`.
    fuzzy: Box<dyn FuzzyIndex>,
    /// Settings the index was built with.
    settings: MatcherSettings,
    /// Build sequence number, assigned by the owning handle.
    generation: u64,
}

impl fmt::Debug for CatalogIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogIndex")
            .field("definitions", &self.definitions.len())
            .field("backend", &self.settings.backend)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl CatalogIndex {
    /// Builds an index over `definitions`.
    ///
    /// Fails on an empty catalog, a repeated id, or score bounds outside `(0, 1]`.
    pub fn build(
        definitions: Vec<ModifierDefinition>,
        settings: &MatcherSettings,
    ) -> Result<Self, CatalogError> {
        check_bound("threshold", settings.threshold)?;
        check_bound("acceptance", settings.acceptance)?;
        if definitions.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut ids = HashMap::with_capacity(definitions.len());
        for (position, def) in definitions.iter().enumerate() {
            if ids.insert(def.id.as_str(), position).is_some() {
                return Err(CatalogError::DuplicateId { id: def.id.clone() });
            }
        }

        let keys: Vec<String> = definitions.iter().map(|d| normalize(&d.text)).collect();
        let mut exact = HashMap::with_capacity(keys.len());
        for (position, key) in keys.iter().enumerate() {
            exact.entry(key.clone()).or_insert(position);
        }
        let fuzzy = build_index(settings.backend, &keys, FuzzyTuning::from(settings));

        info!(
            definitions = definitions.len(),
            distinct_keys = exact.len(),
            backend = %settings.backend,
            "built modifier catalog index"
        );

        Ok(Self {
            definitions,
            keys,
            exact,
            fuzzy,
            settings: settings.clone(),
            generation: 0,
        })
    }

    /// Sets the generation number.
    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Always false for a built index; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Build sequence number; `0` for an index never installed in a handle.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Settings the index was built with.
    pub fn settings(&self) -> &MatcherSettings {
        &self.settings
    }

    /// Definitions in catalog order.
    pub fn definitions(&self) -> &[ModifierDefinition] {
        &self.definitions
    }

    /// Definition at `position`.
    pub fn definition(&self, position: usize) -> Option<&ModifierDefinition> {
        self.definitions.get(position)
    }

    /// Normalized key of the definition at `position`.
    pub fn key(&self, position: usize) -> Option<&str> {
        self.keys.get(position).map(String::as_str)
    }

    /// Looks up a definition by id.
    pub fn find(&self, id: &str) -> Option<&ModifierDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// First definition, in catalog order, whose normalized key equals `key`.
    pub fn lookup_exact(&self, key: &str) -> Option<usize> {
        self.exact.get(key).copied()
    }

    /// Fuzzy candidates for a normalized key, best first, capped at `candidate_limit`.
    pub fn search(&self, key: &str) -> Vec<Candidate> {
        self.fuzzy.query(key, self.settings.candidate_limit)
    }
}

/// Rejects score bounds outside `(0, 1]`.
fn check_bound(name: &'static str, value: f64) -> Result<(), CatalogError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidThreshold { name, value })
    }
}
