//! Ingredient -- one line item of a formulation.

use serde::{Deserialize, Serialize};

/// A raw material line in a recipe.
///
/// The monetary amount is always derived from `quantity * rate`, so it is
/// exposed as a method rather than stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Display/report position, unique within a formulation.
    pub line_no: u32,

    /// Raw material name.
    pub name: String,

    /// Unit-of-measure code (e.g. `"LTR"`, `"KG"`).
    pub unit: String,

    /// Quantity at the formulation's base yield.
    pub quantity: f64,

    /// Cost per unit of this ingredient.
    pub rate: f64,
}

impl Ingredient {
    pub fn new(
        line_no: u32,
        name: impl Into<String>,
        unit: impl Into<String>,
        quantity: f64,
        rate: f64,
    ) -> Self {
        Self {
            line_no,
            name: name.into(),
            unit: unit.into(),
            quantity,
            rate,
        }
    }

    /// Cost of this line: `quantity * rate`.
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }

    /// Returns a copy carrying a new quantity; the rate is unchanged.
    pub fn with_quantity(&self, quantity: f64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}
