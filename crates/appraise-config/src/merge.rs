//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving paths.

use std::{collections::HashMap, path::PathBuf};

use crate::{
    CatalogSettings, Config, ConfigError, MatcherSettings, QuerySettings,
    parse::{RawConfig, RawMatcherSettings, RawQuerySettings},
    resolve::resolve_catalog_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// the working directory), lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins
/// - Catalog path: first defined path wins, resolved against its own file's directory
/// - Category overrides: merged per item class, first definition wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut matcher = MatcherSettings::default();
    let mut query = QuerySettings::default();
    let mut categories = HashMap::new();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.matcher {
            apply_raw_matcher(&mut matcher, raw);
        }
        if let Some(ref raw) = parsed.config.query {
            apply_raw_query(&mut query, raw);
        }
        if let Some(ref raw) = parsed.config.categories {
            categories.extend(raw.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    Ok(Config {
        matcher,
        query,
        catalog: merge_catalog(configs)?,
        categories,
        config_root: configs.first().map(ParsedConfig::dir),
    })
}

/// Applies raw matcher settings to result, overwriting any present values.
fn apply_raw_matcher(result: &mut MatcherSettings, raw: &RawMatcherSettings) {
    if let Some(v) = raw.backend {
        result.backend = v;
    }
    if let Some(v) = raw.threshold {
        result.threshold = v;
    }
    if let Some(v) = raw.acceptance {
        result.acceptance = v;
    }
    if let Some(v) = raw.min_match_len {
        result.min_match_len = v;
    }
    if let Some(v) = raw.candidate_limit {
        result.candidate_limit = v;
    }
}

/// Applies raw query settings to result, overwriting any present values.
fn apply_raw_query(result: &mut QuerySettings, raw: &RawQuerySettings) {
    if let Some(ref v) = raw.status {
        result.status = v.clone();
    }
    if let Some(ref v) = raw.sort {
        result.sort = v.clone();
    }
    if let Some(v) = raw.include_item_level {
        result.include_item_level = v;
    }
    if let Some(v) = raw.strict_categories {
        result.strict_categories = v;
    }
    if let Some(ref v) = raw.league {
        result.league = v.clone();
    }
}

/// Picks the highest-precedence catalog path and resolves it.
fn merge_catalog(configs: &[ParsedConfig]) -> Result<CatalogSettings, ConfigError> {
    for parsed in configs {
        if let Some(path) = parsed
            .config
            .catalog
            .as_ref()
            .and_then(|c| c.path.as_deref())
        {
            return Ok(CatalogSettings {
                path: Some(resolve_catalog_path(path, &parsed.dir())?),
            });
        }
    }
    Ok(CatalogSettings::default())
}
