//! Parse catalog files (TOML, JSON, YAML) and resolve catalog paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogError, Result};
use crate::formulation::Formulation;
use crate::price::ProductPrice;

/// Root structure of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub formulations: Vec<Formulation>,

    #[serde(default)]
    pub prices: Vec<ProductPrice>,
}

impl CatalogFile {
    /// Validates and indexes the parsed records.
    pub fn into_catalog(self) -> Result<Catalog> {
        Catalog::new(self.formulations, self.prices)
    }
}

/// Parse a catalog from a TOML string.
pub fn parse_toml(content: &str) -> Result<CatalogFile> {
    toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Parse a catalog from a JSON string.
pub fn parse_json(content: &str) -> Result<CatalogFile> {
    serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Parse a catalog from a YAML string.
pub fn parse_yaml(content: &str) -> Result<CatalogFile> {
    serde_yaml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Load and validate a catalog from a file path (format chosen by extension).
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    let file = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content)?,
        Some("json") => parse_json(&content)?,
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        _ => parse_json(&content)
            .or_else(|_| parse_toml(&content))
            .or_else(|_| parse_yaml(&content))?,
    };
    file.into_catalog()
}

/// Standard suffixes tried when searching for a catalog by name.
const SUFFIXES: [&str; 4] = [".toml", ".json", ".yaml", ".yml"];

/// Search for a catalog file.
///
/// Search order:
/// 1. Exact path (absolute, or relative to `cwd`)
/// 2. `cwd` with standard extensions
/// 3. `.formulary/` under `cwd` with standard extensions
pub fn find_catalog(name: &str, cwd: &Path) -> Result<PathBuf> {
    let exact = Path::new(name);
    if exact.is_absolute() && exact.is_file() {
        return Ok(exact.to_path_buf());
    }
    let relative = cwd.join(name);
    if relative.is_file() {
        return Ok(relative);
    }

    for dir in [cwd.to_path_buf(), cwd.join(".formulary")] {
        for suffix in SUFFIXES {
            let candidate = dir.join(format!("{}{}", name, suffix));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(CatalogError::NotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FormulationSource;
    use crate::formulation::PackSize;
    use pretty_assertions::assert_eq;

    const TOML_CATALOG: &str = r#"
[[formulations]]
id = 1
slug = "floor-cleaner"
name = "Floor Cleaner"
category = "Cleaning"
base_yield = 100
manual_total_quantity = 100.5
packaging_cost_1l = 9.0
packaging_cost_5l = 32
preparation_steps = ["Charge water", "Add actives under stirring"]

[[formulations.ingredients]]
line_no = 1
name = "RO Water"
unit = "LTR"
quantity = 90
rate = 0.5

[[formulations.ingredients]]
line_no = 2
name = "Pine Oil"
unit = "LTR"
quantity = 2.5
rate = 300

[[prices]]
product = "Floor Cleaner"
retail = 120
bulk = 95
"#;

    #[test]
    fn parse_toml_catalog() {
        let file = parse_toml(TOML_CATALOG).unwrap();
        assert_eq!(file.formulations.len(), 1);
        let f = &file.formulations[0];
        assert_eq!(f.slug, "floor-cleaner");
        assert_eq!(f.base_yield, 100.0);
        assert_eq!(f.manual_total_quantity, Some(100.5));
        assert_eq!(f.ingredients[1].rate, 300.0);
        assert_eq!(f.packaging_cost(PackSize::Ml500), None);
        assert_eq!(f.packaging_cost(PackSize::L5), Some(32.0));
        assert_eq!(f.preparation_steps.len(), 2);
        assert_eq!(file.prices[0].bulk, Some(95.0));
    }

    #[test]
    fn parse_json_catalog_without_prices() {
        let json = r#"{"formulations": [{
            "id": 2, "slug": "hand-wash", "name": "Hand Wash", "base_yield": 50,
            "ingredients": [{"line_no": 1, "name": "RO Water", "unit": "LTR", "quantity": 45, "rate": 0.5}]
        }]}"#;
        let file = parse_json(json).unwrap();
        assert_eq!(file.formulations[0].id, 2);
        assert!(file.prices.is_empty());
    }

    #[test]
    fn parse_yaml_catalog() {
        let yaml = "
formulations:
  - id: 3
    slug: dish-wash
    name: Dish Wash
    base_yield: 20
    ingredients:
      - {line_no: 1, name: LABSA, unit: KG, quantity: 2, rate: 140}
";
        let file = parse_yaml(yaml).unwrap();
        assert_eq!(file.formulations[0].ingredients[0].name, "LABSA");
    }

    #[test]
    fn parse_error_is_reported() {
        let err = parse_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn load_catalog_validates_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, TOML_CATALOG.replace("base_yield = 100", "base_yield = 0")).unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }

    #[test]
    fn load_catalog_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, TOML_CATALOG).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.get(1).unwrap().name, "Floor Cleaner");
        assert_eq!(catalog.price_for("Floor Cleaner").unwrap().retail, Some(120.0));
    }

    #[test]
    fn find_catalog_search_order() {
        let dir = tempfile::tempdir().unwrap();
        let hidden = dir.path().join(".formulary");
        std::fs::create_dir_all(&hidden).unwrap();
        std::fs::write(hidden.join("catalog.json"), "{}").unwrap();

        let found = find_catalog("catalog", dir.path()).unwrap();
        assert_eq!(found, hidden.join("catalog.json"));

        // A file in cwd takes precedence over .formulary/.
        std::fs::write(dir.path().join("catalog.toml"), "").unwrap();
        let found = find_catalog("catalog", dir.path()).unwrap();
        assert_eq!(found, dir.path().join("catalog.toml"));

        let found = find_catalog("catalog.toml", dir.path()).unwrap();
        assert_eq!(found, dir.path().join("catalog.toml"));
    }

    #[test]
    fn find_catalog_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_catalog("missing", dir.path()).unwrap_err();
        assert!(matches!(&err, CatalogError::NotFound(name) if name == "missing"));
        assert_eq!(
            err.to_string(),
            "catalog 'missing' not found (searched the current directory and .formulary/)"
        );
    }
}
