//! Item text lexer.
//!
//! Splits pasted item text into trimmed, non-blank lines and classifies each one by the
//! label it starts with. Classification is context-free; what a line means for the item
//! is decided by the parser's state machine.

/// Label introducing the item class line.
pub const ITEM_CLASS_LABEL: &str = "Item Class:";

/// Label introducing the item level line.
pub const ITEM_LEVEL_LABEL: &str = "Item Level:";

/// Label introducing the rarity line.
pub const RARITY_LABEL: &str = "Rarity:";

/// Marker that separates blocks of item text.
pub const SEPARATOR: &str = "--------";

/// A classified line of item text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `Item Class: <class>`, label stripped.
    ItemClass(&'a str),

    /// `Item Level: <n>`. `None` when the label is not followed by an integer.
    ItemLevel(Option<u32>),

    /// `Rarity: <tier>`, label stripped.
    Rarity(&'a str),

    /// A block separator (`--------`).
    Separator,

    /// Any other line.
    Text(&'a str),
}

impl<'a> Line<'a> {
    /// Classifies a single trimmed line.
    pub fn classify(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix(ITEM_CLASS_LABEL) {
            Self::ItemClass(rest.trim())
        } else if let Some(rest) = line.strip_prefix(ITEM_LEVEL_LABEL) {
            Self::ItemLevel(leading_integer(rest))
        } else if let Some(rest) = line.strip_prefix(RARITY_LABEL) {
            Self::Rarity(rest.trim())
        } else if line.contains(SEPARATOR) {
            Self::Separator
        } else {
            Self::Text(line)
        }
    }
}

/// Parses the integer that directly follows a single space after a label.
///
/// `" 45"` yields 45, `" 45 (max)"` yields 45, `"45"` and `" abc"` yield `None`.
fn leading_integer(rest: &str) -> Option<u32> {
    let digits = rest.strip_prefix(' ')?;
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Returns the trimmed, non-blank lines of `raw` in their original order.
pub fn lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Splits `raw` into classified lines.
pub fn tokenize(raw: &str) -> Vec<Line<'_>> {
    lines(raw).map(Line::classify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(tokenize(""), vec![]);
        assert_eq!(tokenize("  \n\n \r\n"), vec![]);
    }

    #[test]
    fn header_labels() {
        assert_eq!(
            tokenize("Item Class: Amulets\nRarity: Rare\nItem Level: 45"),
            vec![
                Line::ItemClass("Amulets"),
                Line::Rarity("Rare"),
                Line::ItemLevel(Some(45)),
            ]
        );
    }

    #[test]
    fn item_level_without_number() {
        assert_eq!(Line::classify("Item Level: ?"), Line::ItemLevel(None));
        assert_eq!(Line::classify("Item Level:45"), Line::ItemLevel(None));
    }

    #[test]
    fn item_level_with_trailing_text() {
        assert_eq!(
            Line::classify("Item Level: 82 (augmented)"),
            Line::ItemLevel(Some(82))
        );
    }

    #[test]
    fn separator_anywhere_in_line() {
        assert_eq!(Line::classify("--------"), Line::Separator);
        assert_eq!(Line::classify("----------------"), Line::Separator);
        assert_eq!(Line::classify("-----"), Line::Text("-----"));
    }

    #[test]
    fn lines_are_trimmed() {
        assert_eq!(
            tokenize("   +30 to Strength  \r\n"),
            vec![Line::Text("+30 to Strength")]
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(
            Line::classify("item class: Rings"),
            Line::Text("item class: Rings")
        );
    }
}
