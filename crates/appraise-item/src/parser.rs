//! Item text parser.
//!
//! A single forward pass over classified lines drives a small state machine:
//!
//! ```text
//! Header ──(Item Level: n)──▶ AwaitingSeparator ──(--------)──▶ CollectingModifiers
//! ```
//!
//! There is no transition back. Lines in `Header` and `AwaitingSeparator` that carry no
//! label are discarded (names, requirements, properties). Once collecting, every
//! non-separator line that looks like it carries a searchable magnitude is kept, across
//! as many blocks as the item has.
//!
//! Labelled lines (`Item Class:`, `Item Level:`, `Rarity:`) are honoured in every state.
//! A `Rarity: Unique` line additionally captures the next two lines as the item's name
//! and base type.

use std::mem;

use tracing::debug;

use crate::{
    item::{ParsedItem, UNIQUE_RARITY},
    lexer::{Line, lines},
};

/// Phrases that mark a line as a modifier even without a digit.
const MODIFIER_HINTS: &[&str] = &["to ", "increased ", "reduced ", "Recover"];

/// Position of the parser within the item text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Before the item level line.
    Header,
    /// After the item level line, before the next separator.
    AwaitingSeparator,
    /// After the first separator that follows the item level line.
    CollectingModifiers,
}

/// Progress of a unique item's positional name/base type capture.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UniqueCapture {
    /// Not capturing.
    Idle,
    /// The next line is the item name.
    Name,
    /// The next line is the base type; holds the captured name.
    BaseType(String),
}

/// Incremental item text parser.
///
/// Feed it lines with [`ItemParser::feed`] and collect the result with
/// [`ItemParser::finish`]. [`parse`] wraps both for whole texts.
#[derive(Debug)]
pub struct ItemParser {
    /// Current state machine position.
    state: ParserState,
    /// Pending unique name/base type capture.
    capture: UniqueCapture,
    /// Fields gathered so far.
    item: ParsedItem,
}

impl Default for ItemParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemParser {
    /// Creates a parser in the `Header` state.
    pub fn new() -> Self {
        Self {
            state: ParserState::Header,
            capture: UniqueCapture::Idle,
            item: ParsedItem::default(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Feeds one line of item text. Surrounding whitespace is ignored; blank lines are
    /// skipped without affecting state.
    pub fn feed(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        self.advance_capture(line);

        match Line::classify(line) {
            Line::ItemClass(class) => self.item.item_class = Some(class.to_string()),
            Line::ItemLevel(Some(level)) => {
                self.item.item_level = Some(level);
                if self.state == ParserState::Header {
                    self.state = ParserState::AwaitingSeparator;
                }
            }
            Line::ItemLevel(None) => {}
            Line::Rarity(rarity) => {
                if rarity == UNIQUE_RARITY {
                    self.capture = UniqueCapture::Name;
                }
                self.item.rarity = Some(rarity.to_string());
            }
            Line::Separator => {
                if self.state == ParserState::AwaitingSeparator {
                    self.state = ParserState::CollectingModifiers;
                }
            }
            Line::Text(text) => {
                if self.state == ParserState::CollectingModifiers && is_modifier_candidate(text) {
                    self.item.modifier_lines.push(text.to_string());
                }
            }
        }
    }

    /// Records `line` as the unique name or base type if a capture is pending.
    fn advance_capture(&mut self, line: &str) {
        self.capture = match mem::replace(&mut self.capture, UniqueCapture::Idle) {
            UniqueCapture::Idle => UniqueCapture::Idle,
            UniqueCapture::Name => UniqueCapture::BaseType(line.to_string()),
            UniqueCapture::BaseType(name) => {
                self.item.name = Some(name);
                self.item.base_type = Some(line.to_string());
                UniqueCapture::Idle
            }
        };
    }

    /// Consumes the parser and returns the parsed item.
    ///
    /// A unique name without a following base type line is dropped: both are set or
    /// neither is.
    pub fn finish(self) -> ParsedItem {
        self.item
    }
}

/// True when a line inside the modifier section looks like it carries a searchable value.
///
/// Flavour and lore lines usually have neither digits nor the common modifier phrasing.
pub fn is_modifier_candidate(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit()) || MODIFIER_HINTS.iter().any(|h| line.contains(h))
}

/// Parses raw pasted item text.
///
/// Never fails: text without any recognizable structure yields an empty [`ParsedItem`].
pub fn parse(raw: &str) -> ParsedItem {
    let mut parser = ItemParser::new();
    for line in lines(raw) {
        parser.feed(line);
    }
    let state = parser.state();
    let item = parser.finish();
    debug!(
        ?state,
        class = item.item_class.as_deref(),
        rarity = item.rarity.as_deref(),
        modifiers = item.modifier_lines.len(),
        "parsed item text"
    );
    item
}
