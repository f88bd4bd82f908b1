//! Clap argument definitions for the `appraise` CLI.

use std::{env, path::PathBuf, process::exit};

use appraise_config::FuzzyBackend;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Parse a fuzzy matching backend from a string.
fn parse_backend(s: &str) -> Result<FuzzyBackend, String> {
    match s.to_ascii_lowercase().as_str() {
        "substring" => Ok(FuzzyBackend::Substring),
        "term" => Ok(FuzzyBackend::Term),
        other => Err(format!(
            "unknown backend '{other}' (expected 'substring' or 'term')"
        )),
    }
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "appraise")]
#[command(about = "Build marketplace search queries from pasted item text")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log verbosity (-v for info, -vv for debug); APPRAISE_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Shared flags selecting and tuning the modifier catalog.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Catalog JSON file [default: catalog.path from configuration]
    #[arg(short = 'c', long)]
    pub catalog: Option<PathBuf>,

    /// Fuzzy matching backend: substring, term [default: matcher.backend from configuration]
    #[arg(short = 'b', long, value_parser = parse_backend)]
    pub backend: Option<FuzzyBackend>,
}

/// Arguments for `appraise search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// File holding the copied item text; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,

    #[command(flatten)]
    /// Catalog selection.
    pub catalog: CatalogArgs,

    /// Add a minimum item level filter
    #[arg(long)]
    pub ilvl: bool,

    /// League to search in [default: query.league from configuration]
    #[arg(short = 'l', long)]
    pub league: Option<String>,

    /// Wrap the query in a {query, league} request body
    #[arg(long)]
    pub envelope: bool,

    /// Print compact JSON without highlighting
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `appraise parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// File holding the copied item text; reads stdin when omitted or `-`
    pub file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `appraise match`.
#[derive(Args, Debug, Clone)]
pub struct MatchCommand {
    /// Modifier lines as printed on the item
    #[arg(required = true)]
    pub lines: Vec<String>,

    #[command(flatten)]
    /// Catalog selection.
    pub catalog: CatalogArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `appraise init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.appraise.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `appraise` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the search query for an item
    #[command(after_help = "\
INPUT:
  Copy an item in the game client (Ctrl+C) and pipe or paste the text in.

EXAMPLES:
  appraise search item.txt
  xclip -o | appraise search --ilvl
  appraise search item.txt --envelope --league Hardcore
  appraise search item.txt --catalog stats.json --backend term")]
    Search(SearchCommand),

    /// Show how an item's text is parsed
    Parse(ParseCommand),

    /// Match modifier lines against the catalog
    #[command(after_help = "\
FUZZY QUERY SYNTAX:
  Lines are normalized (numbers become #) and then matched word by word.
  word      Fuzzy match
  =word     Exact word
  'word     Must contain word
  ^word     Must start with word
  word$     Must end with word
  !word     Must not contain word
  a | b     Either side

EXAMPLES:
  appraise match '+30 to Strength'
  appraise match '12% increased Attack Speed' '+40 to maximum Life' --json")]
    Match(MatchCommand),

    /// Initialize appraise configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and the catalog
    Check,
}

/// Parses CLI arguments, printing a compact command overview for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_overview_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints top-level help listing each subcommand on one line.
fn print_overview_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: appraise [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:8} {about}");
    }

    println!(
        "  {:<8} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Log verbosity (-v for info, -vv for debug)");
    println!("  -h, --help        Print help");
}
