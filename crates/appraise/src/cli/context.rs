//! Shared context for running CLI commands.

use std::{
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use appraise_catalog::{CatalogHandle, definitions_from_json};
use appraise_config::{Config, MatcherSettings};
use tracing::info;

use super::args::CatalogArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Matcher settings with command-line overrides applied.
    pub fn matcher_settings(&self, args: &CatalogArgs) -> MatcherSettings {
        let mut settings = self.config.matcher.clone();
        if let Some(backend) = args.backend {
            settings.backend = backend;
        }
        settings
    }

    /// Catalog file to use: the `--catalog` flag, else the configured path.
    pub fn catalog_path(&self, args: &CatalogArgs) -> Option<PathBuf> {
        args.catalog
            .as_ref()
            .map(|path| self.cwd.join(path))
            .or_else(|| self.config.catalog.path.clone())
    }

    /// Reads the catalog file and builds a handle with its index installed.
    pub fn catalog(&self, args: &CatalogArgs) -> Result<CatalogHandle, ExitCode> {
        let Some(path) = self.catalog_path(args) else {
            eprintln!("error: no modifier catalog configured");
            eprintln!(
                "Pass --catalog PATH, or set [catalog] path in .appraise.toml (run 'appraise init')."
            );
            return Err(ExitCode::FAILURE);
        };
        load_catalog(&path, &self.matcher_settings(args))
    }
}

/// Reads and indexes the catalog at `path`.
pub fn load_catalog(path: &Path, settings: &MatcherSettings) -> Result<CatalogHandle, ExitCode> {
    let json = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: failed to read catalog {}: {e}", path.display());
        ExitCode::FAILURE
    })?;

    let definitions = definitions_from_json(&json).map_err(|e| {
        eprintln!("error: invalid catalog {}: {e}", path.display());
        ExitCode::FAILURE
    })?;

    let handle = CatalogHandle::with_definitions(definitions, settings).map_err(|e| {
        eprintln!("error: could not index catalog {}: {e}", path.display());
        ExitCode::FAILURE
    })?;
    info!(path = %path.display(), backend = %settings.backend, "catalog loaded");
    Ok(handle)
}

/// Reads item text from `file`, or from stdin when it is absent or `-`.
pub fn read_input(file: Option<&Path>) -> Result<String, ExitCode> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path).map_err(|e| {
            eprintln!("error: failed to read {}: {e}", path.display());
            ExitCode::FAILURE
        }),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|e| {
                eprintln!("error: failed to read stdin: {e}");
                ExitCode::FAILURE
            })?;
            Ok(text)
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
