//! Trade search query building for appraise.
//!
//! Combines a parsed item with the catalog matches for its modifier lines into the JSON
//! document the marketplace search endpoint expects.
//!
//! Two query shapes are produced:
//! - **Identity**: unique items with a name and base type are searched by those, with an
//!   empty stat group
//! - **Stats**: every other item gets one AND group holding a minimum-value filter per
//!   matched modifier line
//!
//! Either shape may carry a category filter (from the item class) and a minimum item level.

#![warn(missing_docs)]

mod builder;
mod category;
mod document;
mod error;
mod search;

pub use builder::{QueryBuilder, QueryOptions};
pub use category::{BUILTIN_CATEGORIES, CategoryTable};
pub use document::{
    AND_GROUP, LevelFilter, OptionFilter, Query, QueryFilters, SearchQueryDocument, Sort,
    StatFilter, StatGroup, StatusFilter, TypeFilterFields, TypeFilters, ValueRange,
};
pub use error::QueryError;
pub use search::{SearchRequest, TRADE_SEARCH_URL, build_for_item, build_search, trade_url};
