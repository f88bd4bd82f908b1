//! Implementation of `appraise check`.

use std::process::ExitCode;

use appraise_config::{ConfigWarning, discover_config_files};

use crate::cli::{
    context::{CommandContext, load_catalog},
    output::{dim, header, success, warning},
};

/// Shows configuration files, catalog status, and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    let config_files = discover_config_files(&ctx.cwd);
    println!("{}", header("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
    }
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    println!("{}", header("Matcher:"));
    println!(
        "   backend {} {}",
        config.matcher.backend,
        dim(&format!(
            "(threshold {}, acceptance {})",
            config.matcher.threshold, config.matcher.acceptance
        ))
    );
    println!();

    let mut healthy = true;
    println!("{}", header("Catalog:"));
    match &config.catalog.path {
        None => println!("   {}", dim("(not configured)")),
        Some(path) if !path.is_file() => {
            println!("   {} {}", path.display(), warning("[missing]"));
        }
        Some(path) => match load_catalog(path, &config.matcher) {
            Ok(handle) => {
                let entries = handle.snapshot().map(|index| index.len()).unwrap_or(0);
                println!(
                    "   {} {}",
                    path.display(),
                    dim(&format!("({entries} modifiers)"))
                );
            }
            Err(_) => healthy = false,
        },
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() && healthy {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    if !warnings.is_empty() {
        println!("{}", header(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        println!();
        print_hints(&warnings);
    }

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .filter_map(|w| match w {
            ConfigWarning::NoCatalogConfigured | ConfigWarning::CatalogPathMissing { .. } => {
                Some("Hint: set [catalog] path to a saved copy of the marketplace stats JSON")
            }
            ConfigWarning::ScoreOutOfRange { .. } => {
                Some("Hint: matcher scores run from 0.0 (identical) to 1.0 (unrelated)")
            }
            ConfigWarning::UnknownStatus { .. } => {
                Some("Hint: query.status is one of online, onlineleague, securable, any")
            }
            ConfigWarning::UnknownSort { .. } => Some("Hint: query.sort is asc or desc"),
            ConfigWarning::EmptyCategory { .. } => {
                Some("Hint: an empty category drops the mapping; delete the entry to keep the built-in one")
            }
            ConfigWarning::MinMatchLenZero | ConfigWarning::NoCandidates => None,
        })
        .collect();
    hints.dedup();

    for hint in hints {
        println!("{}", dim(hint));
    }
}
