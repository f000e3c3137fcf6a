//! `fm version` -- print the tool version and the catalog it would use.
//!
//! Unlike `--version`, this resolves the catalog the same way every other
//! command does, so it answers "which recipes am I costing against?". A
//! missing or broken catalog is reported, never treated as a failure.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use formulary_core::catalog::Catalog;
use formulary_ui::styles::{render_fail_icon, render_muted, render_pass_icon};

use crate::context::RuntimeContext;
use crate::output::output_json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build identifier, overridable at compile time with `FM_BUILD`.
const BUILD: &str = {
    match option_env!("FM_BUILD") {
        Some(b) => b,
        None => "dev",
    }
};

/// What `fm` found when resolving the catalog.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
enum CatalogStatus {
    Loaded {
        path: PathBuf,
        formulations: usize,
        prices: usize,
    },
    Invalid {
        path: PathBuf,
        error: String,
    },
    Missing,
}

impl CatalogStatus {
    fn from_load(path: PathBuf, loaded: Result<Catalog>) -> Self {
        match loaded {
            Ok(catalog) => CatalogStatus::Loaded {
                path,
                formulations: catalog.len(),
                prices: catalog.prices().len(),
            },
            Err(e) => CatalogStatus::Invalid {
                path,
                error: format!("{:#}", e),
            },
        }
    }

    fn describe(&self) -> String {
        match self {
            CatalogStatus::Loaded {
                path,
                formulations,
                prices,
            } => format!(
                "{} catalog {} ({} formulation(s), {} price(s))",
                render_pass_icon(),
                path.display(),
                formulations,
                prices
            ),
            CatalogStatus::Invalid { path, error } => format!(
                "{} catalog {} is invalid: {}",
                render_fail_icon(),
                path.display(),
                error
            ),
            CatalogStatus::Missing => render_muted("no catalog found"),
        }
    }
}

#[derive(Serialize)]
struct VersionInfo {
    version: &'static str,
    build: &'static str,
    catalog: CatalogStatus,
}

/// Execute the `fm version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let catalog = match ctx.catalog_location() {
        Ok(path) => CatalogStatus::from_load(path, ctx.load_catalog()),
        Err(_) => CatalogStatus::Missing,
    };

    if ctx.json {
        output_json(&VersionInfo {
            version: VERSION,
            build: BUILD,
            catalog,
        });
    } else {
        println!("fm version {} ({})", VERSION, BUILD);
        println!("{}", catalog.describe());
    }

    Ok(())
}
