//! Item text parsing for appraise.
//!
//! Turns the text copied from an item tooltip into structured fields:
//!
//! - **Item class**: `Item Class: Amulets`
//! - **Rarity**: `Rarity: Rare`; unique items also get a name and base type
//! - **Item level**: `Item Level: 45`
//! - **Modifier lines**: everything after the header block that looks like it carries a
//!   searchable value
//!
//! # Example
//!
//! ```
//! use appraise_item::parse;
//!
//! let item = parse("Item Class: Amulets\nItem Level: 45\nRarity: Rare\n--------\n+30 to Strength");
//! assert_eq!(item.item_class.as_deref(), Some("Amulets"));
//! assert_eq!(item.modifier_lines, vec!["+30 to Strength"]);
//! ```

#![warn(missing_docs)]

mod item;
mod lexer;
mod parser;

pub use item::{ParsedItem, UNIQUE_RARITY};
pub use lexer::{ITEM_CLASS_LABEL, ITEM_LEVEL_LABEL, Line, RARITY_LABEL, SEPARATOR, tokenize};
pub use parser::{ItemParser, ParserState, is_modifier_candidate, parse};
