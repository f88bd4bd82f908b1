//! Item class to marketplace category mapping.

use std::collections::HashMap;

/// Built-in item class labels and their marketplace category identifiers.
pub const BUILTIN_CATEGORIES: &[(&str, &str)] = &[
    ("Sceptres", "weapon.sceptre"),
    ("Wands", "weapon.wand"),
    ("Staves", "weapon.staff"),
    ("One Hand Axes", "weapon.oneaxe"),
    ("Two Hand Axes", "weapon.twoaxe"),
    ("One Hand Maces", "weapon.onemace"),
    ("Two Hand Maces", "weapon.twomace"),
    ("One Hand Swords", "weapon.onesword"),
    ("Two Hand Swords", "weapon.twosword"),
    ("Thrusting One Hand Swords", "weapon.sword.thrusting.1h"),
    ("Bows", "weapon.bow"),
    ("Claws", "weapon.claw"),
    ("Daggers", "weapon.dagger"),
    ("Rune Daggers", "weapon.runedagger"),
    ("Warstaves", "weapon.warstaff"),
    ("Body Armours", "armour.chest"),
    ("Boots", "armour.boots"),
    ("Gloves", "armour.gloves"),
    ("Helmets", "armour.helmet"),
    ("Shields", "armour.shield"),
    ("Quivers", "armour.quiver"),
    ("Amulets", "accessory.amulet"),
    ("Rings", "accessory.ring"),
    ("Belts", "accessory.belt"),
    ("Crossbows", "weapon.crossbow"),
    ("Flails", "weapon.flail"),
    ("Jewels", "jewel"),
    ("Life Flasks", "flask.life"),
    ("Mana Flasks", "flask.mana"),
];

/// Lookup table from item class label to category identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    /// Item class label -> category identifier.
    entries: HashMap<String, String>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_CATEGORIES
                .iter()
                .map(|(class, id)| ((*class).to_string(), (*id).to_string()))
                .collect(),
        }
    }

    /// The built-in table with `overrides` applied. An override to an empty (or blank)
    /// identifier removes the class from the table.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table = Self::builtin();
        for (class, id) in overrides {
            let id = id.trim();
            if id.is_empty() {
                table.entries.remove(class);
            } else {
                table.entries.insert(class.clone(), id.to_string());
            }
        }
        table
    }

    /// Category identifier for an item class label.
    pub fn lookup(&self, item_class: &str) -> Option<&str> {
        self.entries.get(item_class).map(String::as_str)
    }

    /// Number of mapped classes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no class is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
