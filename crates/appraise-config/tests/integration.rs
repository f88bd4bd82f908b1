//! Integration tests for appraise-config.
//!
//! Exercises the full loading pipeline: discovery -> parse -> resolve -> merge -> validate.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use appraise_config::{Config, ConfigError, ConfigWarning, FuzzyBackend, local_template};

/// Temporary directory tree for a test.
struct TestEnv {
    /// Owned temporary root.
    root: tempfile::TempDir,
}

impl TestEnv {
    /// Creates an empty tree.
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_from_no_files_returns_default() {
    let config = Config::load_from_files(&[]).unwrap();
    assert_eq!(config.matcher.backend, FuzzyBackend::Substring);
    assert_eq!(config.query.league, "Standard");
    assert!(config.config_root.is_none());
}

#[test]
fn test_root_config_stops_discovery() {
    let env = TestEnv::new();
    env.create_file(".appraise.toml", "[query]\nleague = \"Outer\"\n");
    env.create_file(
        "project/.appraise.toml",
        "root = true\n[query]\nsort = \"desc\"\n",
    );
    let cwd = env.create_dir("project/sub");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.query.sort, "desc");
    assert_eq!(config.query.league, "Standard");
    assert_eq!(config.config_root, Some(env.path().join("project")));
}

#[test]
fn test_nested_configs_merge() {
    let env = TestEnv::new();
    env.create_file(
        ".appraise.toml",
        "root = true\n\
         [matcher]\nbackend = \"term\"\nthreshold = 0.5\n\
         [catalog]\npath = \"data/stats.json\"\n\
         [categories]\nFoci = \"armour.focus\"\n",
    );
    env.create_file(
        "league/.appraise.toml",
        "[matcher]\nthreshold = 0.3\n[query]\nleague = \"Hardcore\"\n",
    );
    let cwd = env.create_dir("league");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.matcher.backend, FuzzyBackend::Term);
    assert!((config.matcher.threshold - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.query.league, "Hardcore");
    assert_eq!(config.categories["Foci"], "armour.focus");
    assert_eq!(
        config.catalog.path,
        Some(env.path().join("data/stats.json"))
    );
}

#[test]
fn test_validate_reports_missing_catalog() {
    let env = TestEnv::new();
    let file = env.create_file(".appraise.toml", "[catalog]\npath = \"absent.json\"\n");

    let config = Config::load_from_files(&[file]).unwrap();
    let warnings = config.validate();
    assert!(matches!(
        warnings.as_slice(),
        [ConfigWarning::CatalogPathMissing { .. }]
    ));
}

#[test]
fn test_validate_clean_when_catalog_present() {
    let env = TestEnv::new();
    env.create_file("stats.json", "{\"result\": []}");
    let file = env.create_file(".appraise.toml", "[catalog]\npath = \"stats.json\"\n");

    let config = Config::load_from_files(&[file]).unwrap();
    assert!(config.validate().is_empty());
}

#[test]
fn test_invalid_file_reports_path() {
    let env = TestEnv::new();
    let file = env.create_file(".appraise.toml", "[matcher]\nthreshold = \"high\"\n");

    let err = Config::load_from_files(&[file.clone()]).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { ref path, .. } if *path == file));
}

#[test]
fn test_missing_file_is_read_error() {
    let env = TestEnv::new();
    let err = Config::load_from_files(&[env.path().join("nope.toml")]).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_written_template_loads_as_defaults() {
    let env = TestEnv::new();
    let file = env.create_file(".appraise.toml", &local_template());

    let config = Config::load_from_files(&[file]).unwrap();
    assert!(config.catalog.path.is_none());
    assert!(config.categories.is_empty());
    assert_eq!(config.query.status, "online");
}
