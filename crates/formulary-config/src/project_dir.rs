//! Discovery of the `.formulary/` project directory.
//!
//! The directory holds `config.yaml` and, by convention, the catalog file.

use std::path::{Path, PathBuf};

/// The name of the formulary metadata directory.
pub const FORMULARY_DIR_NAME: &str = ".formulary";

/// The environment variable that overrides directory discovery.
const FORMULARY_DIR_ENV: &str = "FORMULARY_DIR";

/// Walk up the directory tree from `start` looking for a `.formulary/` directory.
///
/// The `FORMULARY_DIR` environment variable is checked first.
pub fn find_formulary_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(FORMULARY_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }
    find_formulary_dir_from(start)
}

/// Walk up from `start` without consulting the environment.
pub fn find_formulary_dir_from(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(FORMULARY_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break,
        }
    }

    None
}
