//! Implementation of `appraise parse`.

use std::process::ExitCode;

use appraise_item::{ParsedItem, parse};

use crate::cli::{
    args::ParseCommand,
    context::read_input,
    output::{dim, header, label, print_json},
};

/// Shows the structured fields parsed from item text.
pub fn run(cmd: &ParseCommand) -> ExitCode {
    let raw = match read_input(cmd.file.as_deref()) {
        Ok(raw) => raw,
        Err(code) => return code,
    };

    let item = parse(&raw);
    if cmd.json {
        return print_json(&item, false);
    }

    if item.is_empty() {
        eprintln!("error: no item header recognized");
        eprintln!("Copy the item in the game client with Ctrl+C and pass the full text.");
        return ExitCode::FAILURE;
    }

    print_item(&item);
    ExitCode::SUCCESS
}

/// Prints the parsed fields, one per line.
fn print_item(item: &ParsedItem) {
    let missing = dim("(none)");
    let field = |value: Option<&str>| value.map_or_else(|| missing.clone(), str::to_string);

    println!("{}", header("Item"));
    println!("   {} {}", label("Class:"), field(item.item_class.as_deref()));
    println!(
        "   {} {}",
        label("Level:"),
        item.item_level
            .map_or_else(|| missing.clone(), |level| level.to_string())
    );
    println!("   {} {}", label("Rarity:"), field(item.rarity.as_deref()));
    println!("   {} {}", label("Name:"), field(item.name.as_deref()));
    println!("   {} {}", label("Base:"), field(item.base_type.as_deref()));
    println!();

    if let Some((name, base_type)) = item.identity() {
        println!(
            "{}",
            dim(&format!("Searched by identity: {name} / {base_type}"))
        );
        println!();
    }

    println!(
        "{}",
        header(&format!("Modifier lines ({}):", item.modifier_lines.len()))
    );
    if item.modifier_lines.is_empty() {
        println!("   {missing}");
    }
    for line in &item.modifier_lines {
        println!("   {line}");
    }
}
