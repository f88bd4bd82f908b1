//! Modifier text normalization.
//!
//! Item text and catalog templates phrase the same modifier differently: concrete numbers
//! against `#` placeholders, explicit `+` signs, bracketed keyword links, and a handful of
//! verb prefixes the catalog omits. [`normalize`] maps both sides to one canonical key:
//!
//! ```text
//! "+30 to [Strength|Strength]"  ->  "# to strength"
//! "Adds 5 to 10 Fire Damage"    ->  "# to # fire damage"
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// A `+` sign directly in front of a digit.
static PLUS_SIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+(\d)").expect("plus sign pattern is valid"));

/// Keyword link brackets.
static BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]]").expect("bracket pattern is valid"));

/// Alternate display phrase after a pipe, up to the next whitespace.
static ALTERNATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\S*").expect("alternate pattern is valid"));

/// A numeric token, optionally signed and fractional.
pub(crate) static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]?\d+\.?\d*").expect("number pattern is valid"));

/// Whitespace runs.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Leading verbs the catalog templates leave out.
const STRIPPED_PREFIXES: &[&str] = &["adds ", "gain ", "you "];

/// Placeholder that replaces every number.
pub const PLACEHOLDER: &str = "#";

/// Canonicalizes one line of modifier text.
///
/// Steps, in order: lower-case, drop `+` before digits, drop `[` and `]`, drop `|alt`
/// segments, replace numbers with `#`, collapse whitespace, then strip leading `adds `,
/// `gain ` and `you `. Prefixes are stripped until none remains, so the result is a fixed
/// point: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let unsigned = PLUS_SIGN_RE.replace_all(&lower, "$1");
    let unbracketed = BRACKET_RE.replace_all(&unsigned, "");
    let unaliased = ALTERNATE_RE.replace_all(&unbracketed, "");
    let templated = NUMBER_RE.replace_all(&unaliased, PLACEHOLDER);
    let collapsed = WHITESPACE_RE.replace_all(&templated, " ");

    let mut key = collapsed.trim();
    while let Some(rest) = STRIPPED_PREFIXES
        .iter()
        .find_map(|prefix| key.strip_prefix(prefix))
    {
        key = rest;
    }
    key.to_string()
}
