//! Configuration system for appraise.
//!
//! appraise uses TOML configuration files named `.appraise.toml`. Configuration is resolved
//! by walking up the directory tree from the current working directory, collecting any
//! `.appraise.toml` files found, then loading `~/.appraise.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawCatalogSettings, RawConfig, RawMatcherSettings, RawQuerySettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_catalog_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for appraise.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.appraise.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Modifier matching settings.
    pub matcher: MatcherSettings,
    /// Search query settings.
    pub query: QuerySettings,
    /// Modifier catalog location.
    pub catalog: CatalogSettings,
    /// Extra or overriding item class label -> marketplace category mappings.
    pub categories: HashMap<String, String>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.appraise.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.appraise.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.appraise.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as an `.appraise.toml` file. Category overrides are
    /// sorted by item class for deterministic output.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            matcher: self.matcher.clone(),
            query: self.query.clone(),
            catalog: self.catalog.clone(),
            categories: self
                .categories
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        toml::to_string_pretty(&serializable).unwrap_or_default()
    }
}

/// Fuzzy matching algorithm used for catalog lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FuzzyBackend {
    /// Approximate substring matching: a query word may match anywhere inside a
    /// modifier's text.
    #[default]
    Substring,
    /// Whole-word matching with a Levenshtein automaton per query word.
    Term,
}

impl fmt::Display for FuzzyBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::Term => write!(f, "term"),
        }
    }
}

/// Modifier matching settings.
///
/// The numeric defaults are tuning values, not derived constants.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherSettings {
    /// Fuzzy matching algorithm.
    pub backend: FuzzyBackend,
    /// Worst score (0.0 = identical, 1.0 = unrelated) a catalog entry may have to be
    /// returned as a fuzzy candidate at all.
    pub threshold: f64,
    /// A fuzzy candidate is accepted only when its score is strictly below this bound.
    pub acceptance: f64,
    /// Query words shorter than this many characters are ignored by fuzzy matching.
    pub min_match_len: usize,
    /// Maximum fuzzy candidates returned per query.
    pub candidate_limit: usize,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            backend: FuzzyBackend::Substring,
            threshold: 0.7,
            acceptance: 0.8,
            min_match_len: 2,
            candidate_limit: 10,
        }
    }
}

/// Search query settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Listing status filter (`online`, `onlineleague`, `securable`, `any`).
    pub status: String,
    /// Price sort direction (`asc` or `desc`).
    pub sort: String,
    /// Whether to add a minimum item level filter when the item level is known.
    pub include_item_level: bool,
    /// Reject items whose class has no category mapping instead of omitting the category.
    pub strict_categories: bool,
    /// League the query is submitted to.
    pub league: String,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            status: String::from("online"),
            sort: String::from("asc"),
            include_item_level: false,
            strict_categories: false,
            league: String::from("Standard"),
        }
    }
}

/// Modifier catalog location.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Path to an already-fetched catalog JSON file, resolved relative to the config file
    /// that defined it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Modifier matching settings.
    matcher: MatcherSettings,
    /// Search query settings.
    query: QuerySettings,
    /// Modifier catalog location.
    catalog: CatalogSettings,
    /// Category overrides (sorted for deterministic output).
    categories: BTreeMap<String, String>,
}
