//! Modifier definitions and the marketplace catalog format.
//!
//! The marketplace publishes its modifiers grouped by origin:
//!
//! ```json
//! {"result": [{"label": "Explicit", "entries": [
//!     {"id": "explicit.stat_3299347043", "text": "# to maximum Life", "type": "explicit"}
//! ]}]}
//! ```
//!
//! Each entry becomes a [`ModifierDefinition`] whose category is its group label.

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// One known modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierDefinition {
    /// Marketplace stat id.
    pub id: String,
    /// Display template, with `#` where values go.
    pub text: String,
    /// Group the modifier belongs to (Explicit, Implicit, Enchant, ...).
    pub category: String,
}

impl ModifierDefinition {
    /// Creates a definition.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Catalog document as served by the marketplace.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSource {
    /// Modifier groups.
    pub result: Vec<CatalogGroup>,
}

/// A labelled group of catalog entries.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogGroup {
    /// Group label, used as each entry's category.
    pub label: String,
    /// Entries in the group.
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

/// A single catalog entry. Fields other than `id` and `text` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Marketplace stat id.
    pub id: String,
    /// Display template.
    pub text: String,
}

impl CatalogSource {
    /// Decodes a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.result.iter().map(|g| g.entries.len()).sum()
    }

    /// Flattens the groups into definitions, keeping document order.
    pub fn into_definitions(self) -> Vec<ModifierDefinition> {
        self.result
            .into_iter()
            .flat_map(|group| {
                let CatalogGroup { label, entries } = group;
                entries
                    .into_iter()
                    .map(move |entry| ModifierDefinition::new(entry.id, entry.text, label.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r##"{
        "result": [
            {
                "id": "explicit",
                "label": "Explicit",
                "entries": [
                    {"id": "explicit.stat_strength", "text": "# to Strength", "type": "explicit"},
                    {"id": "explicit.stat_life", "text": "# to maximum Life", "type": "explicit"}
                ]
            },
            {
                "label": "Implicit",
                "entries": [
                    {"id": "implicit.stat_strength", "text": "# to Strength", "option": {"options": []}}
                ]
            },
            {"label": "Empty"}
        ]
    }"##;

    #[test]
    fn flattens_groups_in_order() {
        let source = CatalogSource::from_json(SOURCE).unwrap();
        assert_eq!(source.entry_count(), 3);

        let defs = source.into_definitions();
        let ids: Vec<_> = defs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "explicit.stat_strength",
                "explicit.stat_life",
                "implicit.stat_strength"
            ]
        );
        assert_eq!(defs[0].category, "Explicit");
        assert_eq!(defs[2].category, "Implicit");
        assert_eq!(defs[2].text, "# to Strength");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = CatalogSource::from_json("{\"result\": [{\"entries\": []}]}").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSource(_)));
    }

    #[test]
    fn empty_result_is_valid_source() {
        let source = CatalogSource::from_json("{\"result\": []}").unwrap();
        assert!(source.into_definitions().is_empty());
    }
}
