//! Implementation of `appraise match`.

use std::process::ExitCode;

use appraise_catalog::{CatalogIndex, MatchKind, StatMatcher, extract_value, normalize};
use appraise_highlight::{Tone, score_tone};
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

use crate::cli::{
    args::MatchCommand,
    context::CommandContext,
    output::{dim, header, print_json},
};

/// How one modifier line fared against the catalog.
#[derive(Debug, Serialize)]
struct LineReport<'a> {
    /// Line as given.
    line: &'a str,
    /// Normalized lookup key.
    normalized: String,
    /// Value read from the line.
    magnitude: f64,
    /// Matched id, or the best rejected candidate's id.
    #[serde(skip_serializing_if = "Option::is_none")]
    modifier_id: Option<String>,
    /// Catalog text of that id.
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Match kind when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<MatchKind>,
    /// Score of the match or of the best candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    /// Whether the line would contribute a stat filter.
    accepted: bool,
}

/// Resolves each line and reports the outcome.
pub fn run(ctx: &CommandContext, cmd: &MatchCommand) -> ExitCode {
    let handle = match ctx.catalog(&cmd.catalog) {
        Ok(handle) => handle,
        Err(code) => return code,
    };
    let index = match handle.snapshot() {
        Ok(index) => index,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let reports: Vec<LineReport<'_>> = cmd.lines.iter().map(|line| report(line, &index)).collect();

    let code = if cmd.json {
        print_json(&reports, false)
    } else {
        print_table(&reports, index.settings().acceptance);
        ExitCode::SUCCESS
    };

    if reports.iter().any(|r| r.accepted) {
        code
    } else {
        ExitCode::FAILURE
    }
}

/// Matches one line, falling back to the best candidate when nothing is accepted.
fn report<'a>(line: &'a str, index: &CatalogIndex) -> LineReport<'a> {
    let normalized = normalize(line);
    let magnitude = extract_value(line);

    if let Some(found) = StatMatcher::new(index).match_line(line) {
        return LineReport {
            line,
            normalized,
            magnitude,
            modifier_id: Some(found.definition.id.clone()),
            text: Some(found.definition.text.clone()),
            kind: Some(found.kind),
            score: Some(found.score),
            accepted: true,
        };
    }

    let best = index
        .search(&normalized)
        .first()
        .and_then(|c| index.definition(c.position).map(|d| (d, c.score)));
    LineReport {
        line,
        modifier_id: best.map(|(d, _)| d.id.clone()),
        text: best.map(|(d, _)| d.text.clone()),
        kind: None,
        score: best.map(|(_, score)| score),
        accepted: false,
        normalized,
        magnitude,
    }
}

/// Table color for a tone.
fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Error => Color::Red,
        Tone::Header => Color::Cyan,
        Tone::Label | Tone::Dim => Color::Reset,
    }
}

/// Prints reports as a table.
fn print_table(reports: &[LineReport<'_>], acceptance: f64) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Line", "Key", "Id", "Kind", "Score", "Value"]);

    for r in reports {
        let kind = match r.kind {
            Some(MatchKind::Exact) => "exact",
            Some(MatchKind::Fuzzy) => "fuzzy",
            None if r.modifier_id.is_some() => "rejected",
            None => "none",
        };
        let score = r.score.map_or_else(
            || Cell::new("-"),
            |score| {
                let tone = if r.accepted {
                    score_tone(score, acceptance)
                } else {
                    Tone::Error
                };
                Cell::new(format!("{score:.3}")).fg(tone_color(tone))
            },
        );
        table.add_row(vec![
            Cell::new(r.line),
            Cell::new(&r.normalized),
            Cell::new(r.modifier_id.as_deref().unwrap_or("-")),
            Cell::new(kind),
            score,
            Cell::new(r.magnitude),
        ]);
    }

    let accepted = reports.iter().filter(|r| r.accepted).count();
    println!("{}", header("Matches"));
    println!("{table}");
    println!(
        "{}",
        dim(&format!(
            "{accepted} of {} lines matched (acceptance < {acceptance})",
            reports.len()
        ))
    );
}
