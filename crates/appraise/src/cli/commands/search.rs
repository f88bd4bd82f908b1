//! Implementation of `appraise search`.

use std::process::ExitCode;

use appraise_catalog::CatalogHandle;
use appraise_item::parse;
use appraise_query::{QueryError, QueryOptions, SearchRequest, build_for_item};
use tracing::debug;

use crate::cli::{
    args::SearchCommand,
    context::{CommandContext, read_input},
    output::{print_json, report_query_error},
};

/// Parses item text and prints its search query.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let raw = match read_input(cmd.file.as_deref()) {
        Ok(raw) => raw,
        Err(code) => return code,
    };

    let item = parse(&raw);
    if item.is_empty() {
        return report_query_error(&QueryError::UnparseableHeader);
    }

    // Identity searches never consult the catalog, so one need not be configured.
    let catalog = if item.identity().is_some() {
        debug!("unique item, skipping catalog load");
        CatalogHandle::new()
    } else {
        match ctx.catalog(&cmd.catalog) {
            Ok(handle) => handle,
            Err(code) => return code,
        }
    };

    let mut options = QueryOptions::from_config(&ctx.config);
    options.include_item_level |= cmd.ilvl;

    let doc = match build_for_item(&item, &catalog, &options) {
        Ok(doc) => doc,
        Err(e) => return report_query_error(&e),
    };

    if cmd.envelope {
        let league = cmd
            .league
            .clone()
            .unwrap_or_else(|| ctx.config.query.league.clone());
        print_json(&SearchRequest::new(doc, league), cmd.compact)
    } else {
        print_json(&doc, cmd.compact)
    }
}
