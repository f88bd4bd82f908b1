//! Configuration file parsing.
//!
//! Parses individual `.appraise.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::{ConfigError, FuzzyBackend};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Matcher section.
    pub matcher: Option<RawMatcherSettings>,
    /// Query section.
    pub query: Option<RawQuerySettings>,
    /// Catalog section.
    pub catalog: Option<RawCatalogSettings>,
    /// Item class label -> category identifier overrides.
    pub categories: Option<HashMap<String, String>>,
}

/// Raw matcher settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawMatcherSettings {
    /// Fuzzy matching algorithm.
    pub backend: Option<FuzzyBackend>,
    /// Candidate score threshold.
    pub threshold: Option<f64>,
    /// Strict upper bound for accepting the best candidate.
    pub acceptance: Option<f64>,
    /// Minimum query word length.
    pub min_match_len: Option<usize>,
    /// Maximum candidates per query.
    pub candidate_limit: Option<usize>,
}

/// Raw query settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawQuerySettings {
    /// Listing status filter.
    pub status: Option<String>,
    /// Price sort direction.
    pub sort: Option<String>,
    /// Whether to add a minimum item level filter.
    pub include_item_level: Option<bool>,
    /// Reject unmapped item classes.
    pub strict_categories: Option<bool>,
    /// League name.
    pub league: Option<String>,
}

/// Raw catalog settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawCatalogSettings {
    /// Catalog JSON path, as written (unresolved).
    pub path: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}
