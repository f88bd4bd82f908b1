//! The structured form of a pasted item.

use serde::Serialize;

/// Rarity tier whose items are searched by identity instead of by modifiers.
pub const UNIQUE_RARITY: &str = "Unique";

/// Structured fields extracted from pasted item text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedItem {
    /// Item class label, e.g. `Amulets`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_class: Option<String>,
    /// Item level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_level: Option<u32>,
    /// Rarity tier, e.g. `Rare` or `Unique`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    /// Unique item name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unique item base type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    /// Candidate modifier lines, in the order they appear in the pasted text.
    pub modifier_lines: Vec<String>,
}

impl ParsedItem {
    /// True when the item is of the unique tier.
    pub fn is_unique(&self) -> bool {
        self.rarity.as_deref() == Some(UNIQUE_RARITY)
    }

    /// Returns the `(name, base type)` pair when this is a unique item with both present.
    pub fn identity(&self) -> Option<(&str, &str)> {
        if !self.is_unique() {
            return None;
        }
        Some((self.name.as_deref()?, self.base_type.as_deref()?))
    }

    /// True when parsing found nothing worth searching for: no item class, no rarity and
    /// no modifier lines.
    pub fn is_empty(&self) -> bool {
        self.item_class.is_none() && self.rarity.is_none() && self.modifier_lines.is_empty()
    }
}
