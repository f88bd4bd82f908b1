//! Turns a parsed item and its matched modifiers into a search query.

use appraise_catalog::MatchResult;
use appraise_config::{Config, QuerySettings};
use appraise_item::ParsedItem;
use tracing::debug;

use crate::{
    category::CategoryTable,
    document::{
        Query, QueryFilters, SearchQueryDocument, Sort, StatFilter, StatGroup, StatusFilter,
    },
    error::QueryError,
};

/// Settings that shape every built query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Listing status option.
    pub status: String,
    /// Price sort direction.
    pub sort: String,
    /// Add a minimum item level filter when the level is known.
    pub include_item_level: bool,
    /// Reject item classes without a category mapping.
    pub strict_categories: bool,
    /// Item class -> category mapping.
    pub categories: CategoryTable,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::from_settings(&QuerySettings::default(), CategoryTable::builtin())
    }
}

impl QueryOptions {
    /// Options from query settings and a category table.
    pub fn from_settings(settings: &QuerySettings, categories: CategoryTable) -> Self {
        Self {
            status: settings.status.clone(),
            sort: settings.sort.clone(),
            include_item_level: settings.include_item_level,
            strict_categories: settings.strict_categories,
            categories,
        }
    }

    /// Options from a loaded configuration, with its category overrides applied.
    pub fn from_config(config: &Config) -> Self {
        Self::from_settings(
            &config.query,
            CategoryTable::with_overrides(&config.categories),
        )
    }
}

/// Builds [`SearchQueryDocument`]s.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    /// Query shaping options.
    options: &'a QueryOptions,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a builder.
    pub fn new(options: &'a QueryOptions) -> Self {
        Self { options }
    }

    /// Builds the query for `item`.
    ///
    /// Unique items with a known name and base type are searched by identity and their
    /// modifier lines are ignored. Every other item is searched by the modifier lines
    /// `resolve` can match, in line order.
    pub fn build(
        &self,
        item: &ParsedItem,
        mut resolve: impl FnMut(&str) -> Option<MatchResult>,
    ) -> Result<SearchQueryDocument, QueryError> {
        if item.is_empty() {
            return Err(QueryError::UnparseableHeader);
        }
        let filters = self.type_filters(item)?;

        let (stats, name, base_type) = if let Some((name, base_type)) = item.identity() {
            debug!(name, base_type, "building identity query");
            (
                vec![StatGroup::and(Vec::new())],
                Some(name.to_string()),
                Some(base_type.to_string()),
            )
        } else {
            let matched: Vec<StatFilter> = item
                .modifier_lines
                .iter()
                .filter_map(|line| {
                    let result = resolve(line);
                    if result.is_none() {
                        debug!(line = line.as_str(), "modifier line left out of query");
                    }
                    result
                })
                .map(|m| StatFilter::at_least(m.modifier_id, m.magnitude))
                .collect();
            if matched.is_empty() {
                return Err(QueryError::NoMatchableStats {
                    lines: item.modifier_lines.clone(),
                });
            }
            debug!(
                matched = matched.len(),
                lines = item.modifier_lines.len(),
                "building stat query"
            );
            (vec![StatGroup::and(matched)], None, None)
        };

        Ok(SearchQueryDocument {
            query: Query {
                status: StatusFilter {
                    option: self.options.status.clone(),
                },
                stats,
                name,
                base_type,
                filters,
            },
            sort: Sort {
                price: self.options.sort.clone(),
            },
        })
    }

    /// Category and item level filters for `item`.
    fn type_filters(&self, item: &ParsedItem) -> Result<Option<QueryFilters>, QueryError> {
        let category = match item.item_class.as_deref() {
            None => None,
            Some(class) => match self.options.categories.lookup(class) {
                Some(id) => Some(id.to_string()),
                None if self.options.strict_categories => {
                    return Err(QueryError::UnsupportedItemClass {
                        class: class.to_string(),
                    });
                }
                None => {
                    debug!(class, "item class has no category mapping");
                    None
                }
            },
        };
        let min_item_level = item
            .item_level
            .filter(|_| self.options.include_item_level);
        Ok(QueryFilters::new(category, min_item_level))
    }
}
