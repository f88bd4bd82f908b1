//! Rendering and JSON serialization for CLI output.
//!
//! Styling and syntax highlighting are applied only when stdout is a terminal, so piped
//! output stays plain.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
    sync::OnceLock,
};

use appraise_highlight::{self as highlight, Highlighter};
use appraise_query::QueryError;
use serde::Serialize;

/// Whether stdout is a terminal, checked once.
fn color_enabled() -> bool {
    /// Cached terminal check.
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| io::stdout().is_terminal())
}

/// Applies a styling function to `text` when color is enabled.
fn styled(paint: fn(&str) -> String, text: &str) -> String {
    if color_enabled() {
        paint(text)
    } else {
        text.to_string()
    }
}

/// Formats a section heading.
pub fn header(text: &str) -> String {
    styled(highlight::header, text)
}

/// Formats a field label.
pub fn label(text: &str) -> String {
    styled(highlight::label, text)
}

/// Formats secondary detail.
pub fn dim(text: &str) -> String {
    styled(highlight::dim, text)
}

/// Formats a success message.
pub fn success(text: &str) -> String {
    styled(highlight::success, text)
}

/// Formats a warning.
pub fn warning(text: &str) -> String {
    styled(highlight::warning, text)
}

/// Serializes `value` to stdout as JSON.
///
/// Pretty-printed and highlighted on a terminal unless `compact` is set.
pub fn print_json<T: Serialize>(value: &T, compact: bool) -> ExitCode {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    let json = match rendered {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !compact && color_enabled() {
        println!("{}", Highlighter::new().json(&json));
    } else {
        println!("{json}");
    }
    ExitCode::SUCCESS
}

/// Prints TOML, highlighted on a terminal.
pub fn print_toml(content: &str) {
    if color_enabled() {
        print!("{}", Highlighter::new().toml(content));
    } else {
        print!("{content}");
    }
}

/// Reports a query building failure with a hint for the conditions a user can fix.
pub fn report_query_error(err: &QueryError) -> ExitCode {
    eprintln!("error: {err}");
    match err {
        QueryError::UnparseableHeader => {
            eprintln!("Copy the item in the game client with Ctrl+C and pass the full text.");
        }
        QueryError::NoMatchableStats { lines } => {
            for line in lines {
                eprintln!("  {line}");
            }
            eprintln!("Check the lines with 'appraise match', or try a different catalog.");
        }
        QueryError::CatalogUnavailable => {
            eprintln!("Pass --catalog PATH or set [catalog] path in .appraise.toml.");
        }
        QueryError::UnsupportedItemClass { .. } => {
            eprintln!(
                "Add a mapping under [categories], or set query.strict_categories = false."
            );
        }
        QueryError::Catalog(_) => {}
    }
    ExitCode::FAILURE
}

