//! End-to-end search building and the submission envelope.

use appraise_catalog::{CatalogHandle, resolve_line};
use appraise_item::{ParsedItem, parse};
use serde::{Deserialize, Serialize};
use tracing::info;
use urlencoding::encode;

use crate::{
    builder::{QueryBuilder, QueryOptions},
    document::SearchQueryDocument,
    error::QueryError,
};

/// Base of the marketplace's search result pages.
pub const TRADE_SEARCH_URL: &str = "https://www.pathofexile.com/trade2/search";

/// Body posted to the search proxy: the query plus the league to search in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search query.
    pub query: SearchQueryDocument,
    /// League name.
    pub league: String,
}

impl SearchRequest {
    /// Wraps a query for `league`.
    pub fn new(query: SearchQueryDocument, league: impl Into<String>) -> Self {
        Self {
            query,
            league: league.into(),
        }
    }
}

/// Result page URL for a search id returned by the marketplace.
pub fn trade_url(league: &str, search_id: &str) -> String {
    format!(
        "{TRADE_SEARCH_URL}/{}/{}",
        encode(league),
        encode(search_id)
    )
}

/// Parses pasted item text and builds its search query.
pub fn build_search(
    raw: &str,
    catalog: &CatalogHandle,
    options: &QueryOptions,
) -> Result<SearchQueryDocument, QueryError> {
    build_for_item(&parse(raw), catalog, options)
}

/// Builds the search query for an already parsed item.
///
/// The catalog is only consulted for items searched by modifiers, so unique items with a
/// known identity can be searched before any catalog is loaded.
pub fn build_for_item(
    item: &ParsedItem,
    catalog: &CatalogHandle,
    options: &QueryOptions,
) -> Result<SearchQueryDocument, QueryError> {
    let builder = QueryBuilder::new(options);
    if item.is_empty() || item.identity().is_some() {
        return builder.build(item, |_| None);
    }

    let index = catalog.snapshot()?;
    let doc = builder.build(item, |line| resolve_line(line, &index))?;
    info!(
        generation = index.generation(),
        filters = doc.query.stats.iter().map(|g| g.filters.len()).sum::<usize>(),
        "built search query"
    );
    Ok(doc)
}
