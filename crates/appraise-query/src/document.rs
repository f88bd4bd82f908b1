//! The marketplace search query document.
//!
//! Field names follow the marketplace schema. Optional parts are omitted when absent
//! rather than sent empty:
//!
//! ```json
//! {
//!   "query": {
//!     "status": {"option": "online"},
//!     "stats": [{"type": "and", "filters": [
//!       {"id": "explicit.stat_strength", "value": {"min": 30}, "disabled": false}
//!     ], "disabled": false}],
//!     "filters": {"type_filters": {"filters": {"category": {"option": "accessory.amulet"}},
//!                                  "disabled": false}}
//!   },
//!   "sort": {"price": "asc"}
//! }
//! ```

use serde::{Deserialize, Serialize, Serializer};

/// Stat group combinator the builder emits.
pub const AND_GROUP: &str = "and";

/// A complete search query, ready to serialize and submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQueryDocument {
    /// Search criteria.
    pub query: Query,
    /// Result ordering.
    pub sort: Sort,
}

/// Search criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Listing status filter.
    pub status: StatusFilter,
    /// Stat filter groups. Identity searches carry a single empty group.
    pub stats: Vec<StatGroup>,
    /// Unique item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unique item base type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    /// Item type filters; omitted when there is nothing to filter on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<QueryFilters>,
}

/// Listing status filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFilter {
    /// Status option, e.g. `online`.
    pub option: String,
}

/// A group of stat filters combined by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatGroup {
    /// Combinator; always `and` here.
    #[serde(rename = "type")]
    pub kind: String,
    /// Stat filters.
    pub filters: Vec<StatFilter>,
    /// Whether the group is disabled.
    pub disabled: bool,
}

impl StatGroup {
    /// An enabled AND group.
    pub fn and(filters: Vec<StatFilter>) -> Self {
        Self {
            kind: AND_GROUP.to_string(),
            filters,
            disabled: false,
        }
    }
}

/// A single stat constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatFilter {
    /// Marketplace stat id.
    pub id: String,
    /// Accepted value range.
    pub value: ValueRange,
    /// Whether the filter is disabled.
    pub disabled: bool,
}

impl StatFilter {
    /// An enabled filter requiring at least `min`.
    pub fn at_least(id: impl Into<String>, min: f64) -> Self {
        Self {
            id: id.into(),
            value: ValueRange { min },
            disabled: false,
        }
    }
}

/// Lower bound on a stat value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Minimum value; whole numbers serialize without a fraction.
    #[serde(serialize_with = "serialize_magnitude")]
    pub min: f64,
}

/// Item type filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilters {
    /// The type filter block.
    pub type_filters: TypeFilters,
}

impl QueryFilters {
    /// Builds the filter block, or `None` when neither filter applies.
    pub fn new(category: Option<String>, min_item_level: Option<u32>) -> Option<Self> {
        if category.is_none() && min_item_level.is_none() {
            return None;
        }
        Some(Self {
            type_filters: TypeFilters {
                filters: TypeFilterFields {
                    category: category.map(|option| OptionFilter { option }),
                    ilvl: min_item_level.map(|min| LevelFilter { min }),
                },
                disabled: false,
            },
        })
    }

    /// Category option, if set.
    pub fn category(&self) -> Option<&str> {
        self.type_filters
            .filters
            .category
            .as_ref()
            .map(|c| c.option.as_str())
    }

    /// Minimum item level, if set.
    pub fn min_item_level(&self) -> Option<u32> {
        self.type_filters.filters.ilvl.map(|l| l.min)
    }
}

/// Type filter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilters {
    /// Individual filters.
    pub filters: TypeFilterFields,
    /// Whether the block is disabled.
    pub disabled: bool,
}

/// Individual type filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilterFields {
    /// Item category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<OptionFilter>,
    /// Minimum item level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ilvl: Option<LevelFilter>,
}

/// A filter selecting one named option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionFilter {
    /// Option identifier.
    pub option: String,
}

/// Minimum item level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFilter {
    /// Minimum level.
    pub min: u32,
}

/// Result ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Price direction, `asc` or `desc`.
    pub price: String,
}

/// Writes whole magnitudes as integers (`30`, not `30.0`).
fn serialize_magnitude<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(filters: Option<QueryFilters>) -> SearchQueryDocument {
        SearchQueryDocument {
            query: Query {
                status: StatusFilter {
                    option: "online".into(),
                },
                stats: vec![StatGroup::and(vec![StatFilter::at_least(
                    "explicit.stat_strength",
                    30.0,
                )])],
                name: None,
                base_type: None,
                filters,
            },
            sort: Sort {
                price: "asc".into(),
            },
        }
    }

    #[test]
    fn serializes_marketplace_shape() {
        let doc = document(QueryFilters::new(Some("accessory.amulet".into()), Some(45)));
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "query": {
                    "status": {"option": "online"},
                    "stats": [{
                        "type": "and",
                        "filters": [{
                            "id": "explicit.stat_strength",
                            "value": {"min": 30},
                            "disabled": false
                        }],
                        "disabled": false
                    }],
                    "filters": {"type_filters": {
                        "filters": {
                            "category": {"option": "accessory.amulet"},
                            "ilvl": {"min": 45}
                        },
                        "disabled": false
                    }}
                },
                "sort": {"price": "asc"}
            })
        );
    }

    #[test]
    fn absent_parts_are_omitted() {
        let value = serde_json::to_value(document(None)).unwrap();
        let query = value["query"].as_object().unwrap();
        assert!(!query.contains_key("filters"));
        assert!(!query.contains_key("name"));
        assert!(!query.contains_key("type"));

        let filters = QueryFilters::new(None, Some(70));
        let value = serde_json::to_value(document(filters)).unwrap();
        let fields = &value["query"]["filters"]["type_filters"]["filters"];
        assert!(fields.get("category").is_none());
        assert_eq!(fields["ilvl"]["min"], 70);
    }

    #[test]
    fn no_filters_without_category_or_level() {
        assert_eq!(QueryFilters::new(None, None), None);
        let filters = QueryFilters::new(Some("jewel".into()), None).unwrap();
        assert_eq!(filters.category(), Some("jewel"));
        assert_eq!(filters.min_item_level(), None);
    }

    #[test]
    fn fractional_magnitudes_keep_fraction() {
        let filter = StatFilter::at_least("explicit.stat_leech", 2.5);
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["value"]["min"], 2.5);

        let filter = StatFilter::at_least("explicit.stat_cold_res", -20.0);
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["value"]["min"], -20);
    }

    #[test]
    fn deserializes_own_output() {
        let doc = document(QueryFilters::new(Some("armour.boots".into()), None));
        let json = serde_json::to_string(&doc).unwrap();
        let back: SearchQueryDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
