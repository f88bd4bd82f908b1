//! Numeric magnitude extraction.

use crate::normalize::NUMBER_RE;

/// Returns the first number in a modifier line, or `0.0` when there is none.
///
/// The line is read as printed, before normalization, so signs and decimals survive:
/// `"-20% to Fire Resistance"` yields `-20.0`. Ranges yield their lower bound.
pub fn extract_value(text: &str) -> f64 {
    NUMBER_RE
        .find(text)
        .and_then(|m| m.as_str().trim_end_matches('.').parse().ok())
        .unwrap_or(0.0)
}
