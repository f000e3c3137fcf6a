//! Yield scaler: linear rescaling of a recipe to a requested output.

use serde::Serialize;
use tracing::debug;

use formulary_core::formulation::Formulation;
use formulary_core::ingredient::Ingredient;

use crate::error::{EngineError, Result};

/// A formulation whose ingredient quantities have been rescaled.
///
/// All other fields, `base_yield` included, are carried over unchanged. The
/// value is a fresh copy with no link back to its source and exposes no
/// mutators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledFormulation {
    formulation: Formulation,
    requested_yield: f64,
    factor: f64,
}

impl ScaledFormulation {
    /// The rescaled recipe.
    pub fn formulation(&self) -> &Formulation {
        &self.formulation
    }

    /// Shorthand for `formulation().ingredients`.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.formulation.ingredients
    }

    /// The yield this copy was scaled to.
    pub fn requested_yield(&self) -> f64 {
        self.requested_yield
    }

    /// `requested_yield / denominator` as applied to every quantity.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn into_formulation(self) -> Formulation {
        self.formulation
    }
}

/// Scale a formulation to `requested_yield`, using its `base_yield` as the
/// denominator.
///
/// Precondition: `formulation.base_yield > 0`, which the catalog guarantees
/// at load time. Zero and negative yields are not rejected; they produce
/// zero or negative quantities.
///
/// # Errors
///
/// Returns [`EngineError::NonFiniteYield`] when `requested_yield` is NaN or
/// infinite.
pub fn scale(formulation: &Formulation, requested_yield: f64) -> Result<ScaledFormulation> {
    scale_to(formulation, requested_yield, formulation.base_yield)
}

/// Scale a formulation with an explicit denominator.
///
/// `factor = requested_yield / denominator`. Each ingredient gets
/// `quantity * factor`; its amount is then derived from the new quantity and
/// the original rate rather than by scaling the old amount.
pub fn scale_to(
    formulation: &Formulation,
    requested_yield: f64,
    denominator: f64,
) -> Result<ScaledFormulation> {
    if !requested_yield.is_finite() {
        return Err(EngineError::NonFiniteYield(requested_yield));
    }

    let factor = requested_yield / denominator;
    debug!(
        slug = %formulation.slug,
        requested_yield,
        denominator,
        factor,
        "scaling formulation"
    );

    let ingredients = formulation
        .ingredients
        .iter()
        .map(|ing| ing.with_quantity(ing.quantity * factor))
        .collect();

    Ok(ScaledFormulation {
        formulation: Formulation {
            ingredients,
            ..formulation.clone()
        },
        requested_yield,
        factor,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use formulary_core::formulation::FormulationBuilder;
    use pretty_assertions::assert_eq;

    pub(crate) const EPS: f64 = 1e-9;

    pub(crate) fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
    }

    fn floor_cleaner() -> Formulation {
        FormulationBuilder::new(1, "floor-cleaner")
            .base_yield(100.0)
            .ingredient("RO Water", "LTR", 90.0, 0.5)
            .ingredient("Pine Oil", "LTR", 2.5, 300.0)
            .ingredient("Emulsifier", "KG", 7.5, 180.0)
            .build()
    }

    #[test]
    fn scale_halves_quantity_and_amount() {
        let f = FormulationBuilder::new(1, "single")
            .base_yield(10.0)
            .ingredient("Concentrate", "LTR", 10.0, 20.0)
            .build();
        let scaled = scale(&f, 5.0).unwrap();
        let ing = &scaled.ingredients()[0];
        assert_eq!(ing.quantity, 5.0);
        assert_eq!(ing.amount(), 100.0);
        assert_eq!(scaled.factor(), 0.5);
        assert_eq!(scaled.requested_yield(), 5.0);
    }

    #[test]
    fn identity_scale_leaves_ingredients_unchanged() {
        let f = floor_cleaner();
        let scaled = scale(&f, f.base_yield).unwrap();
        for (orig, new) in f.ingredients.iter().zip(scaled.ingredients()) {
            assert!(approx(orig.quantity, new.quantity));
            assert!(approx(orig.amount(), new.amount()));
        }
    }

    #[test]
    fn scaling_is_linear() {
        let f = floor_cleaner();
        let yields = [0.5, 1.0, 37.0, 250.0, 1234.5];
        let reference = scale(&f, 1.0).unwrap();
        for y in yields {
            let scaled = scale(&f, y).unwrap();
            for (r, s) in reference.ingredients().iter().zip(scaled.ingredients()) {
                assert!(approx(r.quantity, s.quantity / y), "yield {y}: {} vs {}", r.quantity, s.quantity / y);
            }
        }
    }

    #[test]
    fn other_fields_carried_over() {
        let f = FormulationBuilder::new(4, "carry")
            .name("Carry Over")
            .category("Cleaning")
            .base_yield(20.0)
            .manual_total_quantity(21.0)
            .ingredient("RO Water", "LTR", 20.0, 0.5)
            .step("Mix")
            .build();
        let scaled = scale(&f, 40.0).unwrap().into_formulation();
        assert_eq!(scaled.id, 4);
        assert_eq!(scaled.name, "Carry Over");
        assert_eq!(scaled.base_yield, 20.0);
        assert_eq!(scaled.manual_total_quantity, Some(21.0));
        assert_eq!(scaled.preparation_steps, vec!["Mix"]);
        assert_eq!(scaled.ingredients[0].quantity, 40.0);
    }

    #[test]
    fn source_is_not_mutated() {
        let f = floor_cleaner();
        let before = f.clone();
        let _ = scale(&f, 333.0).unwrap();
        assert_eq!(f, before);
    }

    #[test]
    fn zero_yield_gives_zero_quantities() {
        let scaled = scale(&floor_cleaner(), 0.0).unwrap();
        assert!(scaled.ingredients().iter().all(|i| i.quantity == 0.0 && i.amount() == 0.0));
    }

    #[test]
    fn negative_yield_is_not_rejected() {
        let scaled = scale(&floor_cleaner(), -100.0).unwrap();
        assert_eq!(scaled.ingredients()[0].quantity, -90.0);
        assert_eq!(scaled.ingredients()[0].amount(), -45.0);
    }

    #[test]
    fn non_finite_yield_rejected() {
        let f = floor_cleaner();
        assert!(matches!(scale(&f, f64::NAN), Err(EngineError::NonFiniteYield(_))));
        assert_eq!(
            scale(&f, f64::INFINITY),
            Err(EngineError::NonFiniteYield(f64::INFINITY))
        );
    }

    #[test]
    fn scale_to_uses_explicit_denominator() {
        let f = FormulationBuilder::new(1, "manual")
            .base_yield(100.0)
            .manual_total_quantity(50.0)
            .ingredient("RO Water", "LTR", 100.0, 1.0)
            .build();
        let scaled = scale_to(&f, 25.0, f.nominal_yield()).unwrap();
        assert_eq!(scaled.factor(), 0.5);
        assert_eq!(scaled.ingredients()[0].quantity, 50.0);
    }
}
