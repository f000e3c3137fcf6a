//! Formulation struct -- a named recipe with a base yield and pack pricing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ingredient::Ingredient;

// ---------------------------------------------------------------------------
// Pack sizes
// ---------------------------------------------------------------------------

/// A retail unit of sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackSize {
    #[serde(rename = "500ml")]
    Ml500,
    #[serde(rename = "1l")]
    L1,
    #[serde(rename = "5l")]
    L5,
}

impl PackSize {
    /// All pack sizes, smallest first.
    pub const ALL: [PackSize; 3] = [PackSize::Ml500, PackSize::L1, PackSize::L5];

    /// Pack volume in litres.
    pub fn litres(self) -> f64 {
        match self {
            PackSize::Ml500 => 0.5,
            PackSize::L1 => 1.0,
            PackSize::L5 => 5.0,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            PackSize::Ml500 => "500 mL",
            PackSize::L1 => "1 L",
            PackSize::L5 => "5 L",
        }
    }
}

impl fmt::Display for PackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Formulation
// ---------------------------------------------------------------------------

/// A named recipe.
///
/// Records are supplied by the catalog and never mutated by the engine;
/// scaling always produces a fresh copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formulation {
    pub id: u32,

    /// URL-safe alternate key.
    pub slug: String,

    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Output quantity (litres or kilograms) produced by the listed
    /// ingredient quantities. Always `> 0` for catalog records.
    pub base_yield: f64,

    /// Display override for the nominal total output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_total_quantity: Option<f64>,

    pub ingredients: Vec<Ingredient>,

    /// `None` means the pack size is not offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging_cost_500ml: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging_cost_1l: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging_cost_5l: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preparation_steps: Vec<String>,
}

impl Formulation {
    /// Container cost for a pack size, if that size is priced at all.
    pub fn packaging_cost(&self, size: PackSize) -> Option<f64> {
        match size {
            PackSize::Ml500 => self.packaging_cost_500ml,
            PackSize::L1 => self.packaging_cost_1l,
            PackSize::L5 => self.packaging_cost_5l,
        }
    }

    /// The declared nominal output: the manual total when present, otherwise
    /// the base yield.
    pub fn nominal_yield(&self) -> f64 {
        self.manual_total_quantity.unwrap_or(self.base_yield)
    }

    /// Ingredients sorted by `line_no`, for report display.
    pub fn ingredients_by_line(&self) -> Vec<&Ingredient> {
        let mut lines: Vec<&Ingredient> = self.ingredients.iter().collect();
        lines.sort_by_key(|i| i.line_no);
        lines
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing [`Formulation`] values, mostly in fixtures.
#[derive(Debug, Clone)]
pub struct FormulationBuilder {
    formulation: Formulation,
}

impl FormulationBuilder {
    /// Creates a builder with the given id and slug. The name defaults to the
    /// slug and the base yield to `1.0`.
    pub fn new(id: u32, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            formulation: Formulation {
                id,
                name: slug.clone(),
                slug,
                category: String::new(),
                description: String::new(),
                base_yield: 1.0,
                manual_total_quantity: None,
                ingredients: Vec::new(),
                packaging_cost_500ml: None,
                packaging_cost_1l: None,
                packaging_cost_5l: None,
                preparation_steps: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.formulation.name = name.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.formulation.category = category.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.formulation.description = description.into();
        self
    }

    pub fn base_yield(mut self, base_yield: f64) -> Self {
        self.formulation.base_yield = base_yield;
        self
    }

    pub fn manual_total_quantity(mut self, total: f64) -> Self {
        self.formulation.manual_total_quantity = Some(total);
        self
    }

    /// Appends an ingredient, numbering it after the current last line.
    pub fn ingredient(
        mut self,
        name: impl Into<String>,
        unit: impl Into<String>,
        quantity: f64,
        rate: f64,
    ) -> Self {
        let line_no = self
            .formulation
            .ingredients
            .iter()
            .map(|i| i.line_no)
            .max()
            .unwrap_or(0)
            + 1;
        self.formulation
            .ingredients
            .push(Ingredient::new(line_no, name, unit, quantity, rate));
        self
    }

    pub fn packaging_cost(mut self, size: PackSize, cost: f64) -> Self {
        match size {
            PackSize::Ml500 => self.formulation.packaging_cost_500ml = Some(cost),
            PackSize::L1 => self.formulation.packaging_cost_1l = Some(cost),
            PackSize::L5 => self.formulation.packaging_cost_5l = Some(cost),
        }
        self
    }

    pub fn step(mut self, step: impl Into<String>) -> Self {
        self.formulation.preparation_steps.push(step.into());
        self
    }

    pub fn build(self) -> Formulation {
        self.formulation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_numbers_ingredients() {
        let f = FormulationBuilder::new(1, "floor-cleaner")
            .ingredient("RO Water", "LTR", 90.0, 0.5)
            .ingredient("Pine Oil", "LTR", 2.0, 300.0)
            .build();
        assert_eq!(f.ingredients[0].line_no, 1);
        assert_eq!(f.ingredients[1].line_no, 2);
        assert_eq!(f.name, "floor-cleaner");
    }

    #[test]
    fn nominal_yield_prefers_manual_total() {
        let plain = FormulationBuilder::new(1, "a").base_yield(100.0).build();
        assert_eq!(plain.nominal_yield(), 100.0);

        let manual = FormulationBuilder::new(2, "b")
            .base_yield(100.0)
            .manual_total_quantity(104.5)
            .build();
        assert_eq!(manual.nominal_yield(), 104.5);
    }

    #[test]
    fn packaging_cost_by_size() {
        let f = FormulationBuilder::new(1, "a")
            .packaging_cost(PackSize::L1, 9.0)
            .build();
        assert_eq!(f.packaging_cost(PackSize::L1), Some(9.0));
        assert_eq!(f.packaging_cost(PackSize::Ml500), None);
        assert_eq!(f.packaging_cost(PackSize::L5), None);
    }

    #[test]
    fn ingredients_by_line_sorts_without_mutating() {
        let mut f = FormulationBuilder::new(1, "a").build();
        f.ingredients = vec![
            Ingredient::new(3, "C", "KG", 1.0, 1.0),
            Ingredient::new(1, "A", "KG", 1.0, 1.0),
            Ingredient::new(2, "B", "KG", 1.0, 1.0),
        ];
        let names: Vec<&str> = f.ingredients_by_line().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(f.ingredients[0].name, "C");
    }

    #[test]
    fn pack_size_labels_and_volumes() {
        assert_eq!(PackSize::Ml500.label(), "500 mL");
        assert_eq!(PackSize::L5.to_string(), "5 L");
        assert_eq!(PackSize::ALL.map(PackSize::litres), [0.5, 1.0, 5.0]);
    }

    #[test]
    fn deserialize_minimal_json_uses_defaults() {
        let json = r#"{
            "id": 7,
            "slug": "hand-wash",
            "name": "Hand Wash",
            "base_yield": 50,
            "ingredients": [
                {"line_no": 1, "name": "RO Water", "unit": "LTR", "quantity": 40, "rate": 0.5}
            ],
            "packaging_cost_500ml": 8.5
        }"#;
        let f: Formulation = serde_json::from_str(json).unwrap();
        assert_eq!(f.id, 7);
        assert_eq!(f.category, "");
        assert_eq!(f.manual_total_quantity, None);
        assert_eq!(f.packaging_cost(PackSize::Ml500), Some(8.5));
        assert_eq!(f.packaging_cost(PackSize::L1), None);
        assert!(f.preparation_steps.is_empty());
    }
}
