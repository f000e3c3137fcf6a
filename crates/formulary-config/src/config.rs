//! Configuration types and loading for the formulary system.
//!
//! The main entry point is [`FormularyConfig`], which represents the contents
//! of `.formulary/config.yaml`. Configuration is loaded with [`load_config`]
//! and saved with [`save_config`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Indent report configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IndentConfig {
    /// List contributing formulations on each indent line.
    #[serde(default, rename = "show-sources")]
    pub show_sources: bool,
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full formulary configuration, corresponding to `.formulary/config.yaml`.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// will be deserialized correctly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormularyConfig {
    /// Catalog file path. Relative paths are resolved against the directory
    /// that contains `.formulary/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Output JSON instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    /// Indent report configuration.
    #[serde(default)]
    pub indent: IndentConfig,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from `config.yaml` inside the given `.formulary/` directory.
///
/// If the file does not exist, a default [`FormularyConfig`] is returned.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// or [`ConfigError::ParseError`] if it contains invalid YAML.
pub fn load_config(formulary_dir: &Path) -> Result<FormularyConfig> {
    let config_path = formulary_dir.join("config.yaml");

    if !config_path.exists() {
        return Ok(FormularyConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)?;

    // An empty file is valid and yields default config.
    if content.trim().is_empty() {
        return Ok(FormularyConfig::default());
    }

    let config: FormularyConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.formulary/` directory.
///
/// The directory is created if it does not exist.
pub fn save_config(formulary_dir: &Path, config: &FormularyConfig) -> Result<()> {
    std::fs::create_dir_all(formulary_dir)?;

    let config_path = formulary_dir.join("config.yaml");
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let cfg = FormularyConfig::default();
        assert!(cfg.catalog.is_none());
        assert!(!cfg.json);
        assert!(!cfg.indent.show_sources);
    }

    #[test]
    fn test_load_missing_config_returns_default() {
        let dir = PathBuf::from("/nonexistent/path/.formulary");
        let cfg = load_config(&dir).unwrap();
        assert!(cfg.catalog.is_none());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "  \n").unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert!(!cfg.json);
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let formulary_dir = dir.path().join(".formulary");

        let mut cfg = FormularyConfig::default();
        cfg.catalog = Some("data/catalog.toml".to_string());
        cfg.indent.show_sources = true;

        save_config(&formulary_dir, &cfg).unwrap();
        let loaded = load_config(&formulary_dir).unwrap();

        assert_eq!(loaded.catalog.as_deref(), Some("data/catalog.toml"));
        assert!(loaded.indent.show_sources);
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = "catalog: catalog.json\nindent:\n  show-sources: true\n";
        let cfg: FormularyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.catalog.as_deref(), Some("catalog.json"));
        assert!(cfg.indent.show_sources);
        assert!(!cfg.json);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "json: [not, a, bool").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
