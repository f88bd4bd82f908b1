//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// Listing status options the marketplace understands.
const KNOWN_STATUSES: &[&str] = &["online", "onlineleague", "securable", "any"];

/// Price sort directions the marketplace understands.
const KNOWN_SORTS: &[&str] = &["asc", "desc"];

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// A matcher score bound lies outside `(0, 1]`.
    ScoreOutOfRange {
        /// Setting name.
        name: &'static str,
        /// Configured value.
        value: f64,
    },
    /// `min_match_len` is zero, so single-character words take part in fuzzy matching.
    MinMatchLenZero,
    /// `candidate_limit` is zero, so fuzzy matching never returns anything.
    NoCandidates,
    /// The status option is not one the marketplace accepts.
    UnknownStatus {
        /// Configured value.
        status: String,
    },
    /// The sort direction is not `asc` or `desc`.
    UnknownSort {
        /// Configured value.
        sort: String,
    },
    /// No catalog path is configured.
    NoCatalogConfigured,
    /// The configured catalog file does not exist.
    CatalogPathMissing {
        /// Resolved path.
        path: String,
    },
    /// A category override maps an item class to an empty identifier.
    EmptyCategory {
        /// Item class label.
        item_class: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScoreOutOfRange { name, value } => {
                write!(f, "matcher.{name} = {value} is outside (0, 1]")
            }
            Self::MinMatchLenZero => write!(f, "matcher.min_match_len is 0"),
            Self::NoCandidates => write!(f, "matcher.candidate_limit is 0"),
            Self::UnknownStatus { status } => write!(f, "unknown query.status '{status}'"),
            Self::UnknownSort { sort } => write!(f, "unknown query.sort '{sort}'"),
            Self::NoCatalogConfigured => write!(f, "no catalog path configured"),
            Self::CatalogPathMissing { path } => write!(f, "catalog file does not exist: {path}"),
            Self::EmptyCategory { item_class } => {
                write!(f, "category override for '{item_class}' is empty")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let matcher = &config.matcher;

    for (name, value) in [
        ("threshold", matcher.threshold),
        ("acceptance", matcher.acceptance),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            warnings.push(ConfigWarning::ScoreOutOfRange { name, value });
        }
    }
    if matcher.min_match_len == 0 {
        warnings.push(ConfigWarning::MinMatchLenZero);
    }
    if matcher.candidate_limit == 0 {
        warnings.push(ConfigWarning::NoCandidates);
    }

    if !KNOWN_STATUSES.contains(&config.query.status.as_str()) {
        warnings.push(ConfigWarning::UnknownStatus {
            status: config.query.status.clone(),
        });
    }
    if !KNOWN_SORTS.contains(&config.query.sort.as_str()) {
        warnings.push(ConfigWarning::UnknownSort {
            sort: config.query.sort.clone(),
        });
    }

    match &config.catalog.path {
        None => warnings.push(ConfigWarning::NoCatalogConfigured),
        Some(path) if !path.is_file() => warnings.push(ConfigWarning::CatalogPathMissing {
            path: path.display().to_string(),
        }),
        Some(_) => {}
    }

    let mut empty: Vec<_> = config
        .categories
        .iter()
        .filter(|(_, id)| id.trim().is_empty())
        .map(|(class, _)| class.clone())
        .collect();
    empty.sort();
    warnings.extend(
        empty
            .into_iter()
            .map(|item_class| ConfigWarning::EmptyCategory { item_class }),
    );

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogSettings, test_support::TestDir};

    /// A config whose catalog exists, so only the setting under test produces warnings.
    fn config_with_catalog(dir: &TestDir) -> Config {
        let path = dir.create_file("stats.json", "{\"result\": []}");
        Config {
            catalog: CatalogSettings { path: Some(path) },
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config_has_no_warnings() {
        let dir = TestDir::new();
        let config = config_with_catalog(&dir);
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_default_config_warns_about_catalog() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, vec![ConfigWarning::NoCatalogConfigured]);
    }

    #[test]
    fn test_missing_catalog_file() {
        let dir = TestDir::new();
        let config = Config {
            catalog: CatalogSettings {
                path: Some(dir.path().join("missing.json")),
            },
            ..Config::default()
        };
        let warnings = validate_config(&config);
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::CatalogPathMissing { .. }]
        ));
    }

    #[test]
    fn test_scores_out_of_range() {
        let dir = TestDir::new();
        let mut config = config_with_catalog(&dir);
        config.matcher.threshold = 0.0;
        config.matcher.acceptance = 1.5;

        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![
                ConfigWarning::ScoreOutOfRange {
                    name: "threshold",
                    value: 0.0
                },
                ConfigWarning::ScoreOutOfRange {
                    name: "acceptance",
                    value: 1.5
                },
            ]
        );
    }

    #[test]
    fn test_nan_threshold_is_out_of_range() {
        let dir = TestDir::new();
        let mut config = config_with_catalog(&dir);
        config.matcher.threshold = f64::NAN;
        assert_eq!(validate_config(&config).len(), 1);
    }

    #[test]
    fn test_unknown_status_and_sort() {
        let dir = TestDir::new();
        let mut config = config_with_catalog(&dir);
        config.query.status = "offline".into();
        config.query.sort = "up".into();

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::UnknownStatus {
            status: "offline".into()
        }));
        assert!(warnings.contains(&ConfigWarning::UnknownSort { sort: "up".into() }));
    }

    #[test]
    fn test_empty_category_override() {
        let dir = TestDir::new();
        let mut config = config_with_catalog(&dir);
        config.categories.insert("Foci".into(), "  ".into());
        config.matcher.min_match_len = 0;

        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![
                ConfigWarning::MinMatchLenZero,
                ConfigWarning::EmptyCategory {
                    item_class: "Foci".into()
                },
            ]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::ScoreOutOfRange {
            name: "acceptance",
            value: 2.0,
        };
        assert_eq!(warning.to_string(), "matcher.acceptance = 2 is outside (0, 1]");
    }
}
