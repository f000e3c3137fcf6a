//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds everything a command handler needs: global
//! flags merged with `.formulary/config.yaml`, and the catalog location.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use formulary_config::config::{FormularyConfig, load_config};
use formulary_config::project_dir::find_formulary_dir;
use formulary_core::catalog::Catalog;
use formulary_core::loader;

use crate::cli::GlobalArgs;

/// Default catalog name searched for when nothing is configured.
const DEFAULT_CATALOG: &str = "catalog";

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit catalog path from `--catalog` or the config file.
    pub catalog_path: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,

    /// Loaded project configuration (defaults when no `.formulary/` exists).
    pub config: FormularyConfig,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Catalog priority: `--catalog` flag (or `FORMULARY_CATALOG`) > `catalog`
    /// in `.formulary/config.yaml` > search for `catalog.*` at load time.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to determine current directory")?;
        let formulary_dir = find_formulary_dir(&cwd);

        let config = match formulary_dir.as_deref() {
            Some(dir) => load_config(dir)
                .with_context(|| format!("failed to load config from {}", dir.display()))?,
            None => FormularyConfig::default(),
        };

        let catalog_path = match (&global.catalog, &config.catalog) {
            (Some(flag), _) => Some(PathBuf::from(flag)),
            (None, Some(configured)) => Some(resolve_configured_path(
                configured,
                formulary_dir.as_deref(),
            )),
            (None, None) => None,
        };

        Ok(Self {
            catalog_path,
            json: global.json || config.json,
            verbose: global.verbose,
            quiet: global.quiet,
            config,
        })
    }

    /// The catalog file to use: the explicit path, else the first
    /// `catalog.{toml,json,yaml,yml}` found from the current directory.
    pub fn catalog_location(&self) -> Result<PathBuf> {
        if let Some(p) = &self.catalog_path {
            return Ok(p.clone());
        }
        let cwd = env::current_dir()?;
        loader::find_catalog(DEFAULT_CATALOG, &cwd).context(
            "no catalog found. Pass --catalog <file> or set `catalog` in .formulary/config.yaml",
        )
    }

    /// Locate, parse and validate the catalog.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.catalog_location()?;
        debug!(path = %path.display(), "loading catalog");

        loader::load_catalog(&path)
            .with_context(|| format!("failed to load catalog {}", path.display()))
    }
}

/// Resolve a configured catalog path relative to the project root (the
/// directory containing `.formulary/`).
fn resolve_configured_path(configured: &str, formulary_dir: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(configured);
    if path.is_absolute() {
        return path;
    }
    match formulary_dir.and_then(Path::parent) {
        Some(root) => root.join(path),
        None => path,
    }
}
