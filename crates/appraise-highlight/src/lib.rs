//! Terminal styling for appraise.
//!
//! Query documents and configuration are printed syntax highlighted when stdout is a
//! terminal; status lines use a small fixed palette of [`Tone`]s.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra},
};

/// Escape sequence that clears all styling.
pub const RESET: &str = "\x1b[0m";

/// Syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions.
    syntaxes: SyntaxSet,
    /// Bundled color themes.
    themes: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self::with_theme(EmbeddedThemeName::Dracula)
    }

    /// Creates a highlighter using `theme`.
    pub fn with_theme(theme: EmbeddedThemeName) -> Self {
        Self {
            syntaxes: extra_newlines(),
            themes: extra(),
            theme,
        }
    }

    /// Highlights a JSON document.
    pub fn json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights TOML configuration.
    pub fn toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights `content` as the language with file extension or name `language`.
    ///
    /// Unknown languages are rendered as plain text.
    pub fn highlight(&self, content: &str, language: &str) -> String {
        let mut lines = HighlightLines::new(self.syntax(language), self.themes.get(self.theme));

        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            match lines.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => output.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
                Err(_) => output.push_str(line),
            }
        }
        output.push_str(RESET);
        output
    }

    /// Looks up a syntax by extension, then by name, falling back to plain text.
    fn syntax(&self, language: &str) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_extension(language)
            .or_else(|| self.syntaxes.find_syntax_by_name(language))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}

/// Styles used for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Section headings: bold cyan.
    Header,
    /// Labels: bold.
    Label,
    /// Secondary detail: dim.
    Dim,
    /// Positive outcomes: green.
    Success,
    /// Degraded outcomes: yellow.
    Warning,
    /// Failures: red.
    Error,
}

impl Tone {
    /// Escape sequence that starts this tone.
    pub fn code(self) -> &'static str {
        match self {
            Self::Header => "\x1b[1m\x1b[36m",
            Self::Label => "\x1b[1m",
            Self::Dim => "\x1b[2m",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
        }
    }

    /// Wraps `text` in this tone.
    pub fn paint(self, text: &str) -> String {
        format!("{}{text}{RESET}", self.code())
    }
}

/// Formats a section heading.
pub fn header(text: &str) -> String {
    Tone::Header.paint(text)
}

/// Formats a label.
pub fn label(text: &str) -> String {
    Tone::Label.paint(text)
}

/// Formats secondary detail.
pub fn dim(text: &str) -> String {
    Tone::Dim.paint(text)
}

/// Formats a success message.
pub fn success(text: &str) -> String {
    Tone::Success.paint(text)
}

/// Formats a warning.
pub fn warning(text: &str) -> String {
    Tone::Warning.paint(text)
}

/// Tone for a match score: exact matches are a success, accepted fuzzy matches a warning,
/// rejected ones an error.
pub fn score_tone(score: f64, acceptance: f64) -> Tone {
    if score == 0.0 {
        Tone::Success
    } else if score < acceptance {
        Tone::Warning
    } else {
        Tone::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_highlighted() {
        let output = Highlighter::new().json("{\"sort\": {\"price\": \"asc\"}}\n");
        assert!(output.contains("\x1b[38;2;"));
        assert!(output.contains("price"));
        assert!(output.ends_with(RESET));
    }

    #[test]
    fn toml_is_highlighted() {
        let output = Highlighter::new().toml("[query]\nleague = \"Standard\"\n");
        assert!(output.contains("\x1b["));
        assert!(output.contains("league"));
        assert!(output.ends_with(RESET));
    }

    #[test]
    fn unknown_language_keeps_text() {
        let output = Highlighter::new().highlight("plain words", "no-such-language");
        assert!(output.contains("plain words"));
    }

    #[test]
    fn json_and_toml_syntaxes_are_bundled() {
        let syntaxes = extra_newlines();
        assert!(syntaxes.find_syntax_by_extension("json").is_some());
        assert!(syntaxes.find_syntax_by_extension("toml").is_some());
    }

    #[test]
    fn tones_wrap_and_reset() {
        let painted = header("Matches");
        assert!(painted.starts_with(Tone::Header.code()));
        assert!(painted.ends_with(RESET));
        assert!(painted.contains("Matches"));
        assert_eq!(dim("x"), format!("\x1b[2mx{RESET}"));
    }

    #[test]
    fn score_tones() {
        assert_eq!(score_tone(0.0, 0.8), Tone::Success);
        assert_eq!(score_tone(0.3, 0.8), Tone::Warning);
        assert_eq!(score_tone(0.8, 0.8), Tone::Error);
    }
}
