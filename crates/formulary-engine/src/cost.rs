//! Cost calculator: per-unit and per-pack costs of a scaled recipe.
//!
//! Per-unit cost is taken over the yield the recipe was scaled to, which
//! makes it a property of the recipe: scaling multiplies the total amount and
//! the yield by the same factor and leaves the ratio unchanged.

use serde::Serialize;

use formulary_core::formulation::PackSize;

use crate::scale::ScaledFormulation;

/// One priced product-plus-container combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PackLine {
    pub size: PackSize,
    pub product_cost: f64,
    pub packaging_cost: f64,
    pub total_cost: f64,
}

/// Cost figures derived from a [`ScaledFormulation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    /// Manual total when the formulation declares one, else the sum of the
    /// scaled ingredient quantities. Display only.
    pub total_quantity: f64,

    /// Sum of the scaled ingredient amounts.
    pub total_amount: f64,

    /// `total_amount / requested_yield`, or `0` when nothing was requested.
    pub cost_per_unit: f64,

    /// The yield the summary was computed for.
    pub requested_yield: f64,

    #[serde(skip)]
    packaging: [Option<f64>; 3],
}

fn slot(size: PackSize) -> usize {
    match size {
        PackSize::Ml500 => 0,
        PackSize::L1 => 1,
        PackSize::L5 => 2,
    }
}

impl CostSummary {
    /// Product cost for one pack, without the container.
    pub fn product_cost(&self, size: PackSize) -> f64 {
        self.cost_per_unit * size.litres()
    }

    /// The formulation's container cost for `size`, if any.
    pub fn packaging_cost(&self, size: PackSize) -> Option<f64> {
        self.packaging[slot(size)]
    }

    /// Product cost plus container cost (a missing container counts as 0).
    pub fn total_cost_per_pack(&self, size: PackSize) -> f64 {
        self.product_cost(size) + self.packaging_cost(size).unwrap_or(0.0)
    }

    /// Pack sizes with a present, strictly positive packaging cost.
    pub fn offered_pack_sizes(&self) -> Vec<PackSize> {
        PackSize::ALL
            .into_iter()
            .filter(|&size| self.packaging_cost(size).is_some_and(|c| c > 0.0))
            .collect()
    }

    /// One [`PackLine`] per offered pack size, smallest first.
    pub fn pack_lines(&self) -> Vec<PackLine> {
        self.offered_pack_sizes()
            .into_iter()
            .map(|size| PackLine {
                size,
                product_cost: self.product_cost(size),
                packaging_cost: self.packaging_cost(size).unwrap_or(0.0),
                total_cost: self.total_cost_per_pack(size),
            })
            .collect()
    }
}

/// Summarize the cost of a scaled formulation.
pub fn summarize(scaled: &ScaledFormulation) -> CostSummary {
    let formulation = scaled.formulation();

    let total_quantity = formulation
        .manual_total_quantity
        .unwrap_or_else(|| scaled.ingredients().iter().map(|i| i.quantity).sum());
    let total_amount: f64 = scaled.ingredients().iter().map(|i| i.amount()).sum();

    let requested_yield = scaled.requested_yield();
    let cost_per_unit = if requested_yield == 0.0 {
        0.0
    } else {
        total_amount / requested_yield
    };

    CostSummary {
        total_quantity,
        total_amount,
        cost_per_unit,
        requested_yield,
        packaging: PackSize::ALL.map(|size| formulation.packaging_cost(size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::scale;
    use crate::scale::tests::approx;
    use formulary_core::formulation::{Formulation, FormulationBuilder};
    use pretty_assertions::assert_eq;

    fn single_line() -> Formulation {
        FormulationBuilder::new(1, "single")
            .base_yield(10.0)
            .ingredient("Concentrate", "LTR", 10.0, 20.0)
            .packaging_cost(PackSize::Ml500, 6.0)
            .packaging_cost(PackSize::L1, 0.0)
            .packaging_cost(PackSize::L5, 25.0)
            .build()
    }

    #[test]
    fn base_yield_summary() {
        let summary = summarize(&scale(&single_line(), 10.0).unwrap());
        assert_eq!(summary.total_quantity, 10.0);
        assert_eq!(summary.total_amount, 200.0);
        assert_eq!(summary.cost_per_unit, 20.0);
    }

    #[test]
    fn cost_per_unit_uses_requested_yield() {
        // At half the base yield the total halves but the per-unit cost holds.
        let summary = summarize(&scale(&single_line(), 5.0).unwrap());
        assert_eq!(summary.total_amount, 100.0);
        assert_eq!(summary.cost_per_unit, 20.0);
        assert_eq!(summary.requested_yield, 5.0);
    }

    #[test]
    fn cost_per_unit_invariant_under_scaling() {
        let f = FormulationBuilder::new(2, "multi")
            .base_yield(100.0)
            .ingredient("RO Water", "LTR", 90.0, 0.5)
            .ingredient("Pine Oil", "LTR", 2.5, 300.0)
            .ingredient("Emulsifier", "KG", 7.5, 180.0)
            .build();
        let base = summarize(&scale(&f, f.base_yield).unwrap()).cost_per_unit;
        for y in [0.25, 3.0, 99.0, 1000.0, 12345.678] {
            let c = summarize(&scale(&f, y).unwrap()).cost_per_unit;
            assert!(approx(base, c), "yield {y}: {base} vs {c}");
        }
    }

    #[test]
    fn zero_yield_costs_nothing() {
        let summary = summarize(&scale(&single_line(), 0.0).unwrap());
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.cost_per_unit, 0.0);
        assert_eq!(summary.product_cost(PackSize::L1), 0.0);
    }

    #[test]
    fn manual_total_overrides_display_quantity_only() {
        let f = FormulationBuilder::new(3, "manual")
            .base_yield(10.0)
            .manual_total_quantity(12.0)
            .ingredient("A", "KG", 6.0, 10.0)
            .ingredient("B", "KG", 4.0, 5.0)
            .build();
        let summary = summarize(&scale(&f, 20.0).unwrap());
        assert_eq!(summary.total_quantity, 12.0);
        assert_eq!(summary.total_amount, 160.0);
        assert_eq!(summary.cost_per_unit, 8.0);
    }

    #[test]
    fn pack_costs() {
        let summary = summarize(&scale(&single_line(), 10.0).unwrap());
        assert_eq!(summary.product_cost(PackSize::Ml500), 10.0);
        assert_eq!(summary.product_cost(PackSize::L1), 20.0);
        assert_eq!(summary.product_cost(PackSize::L5), 100.0);
        assert_eq!(summary.total_cost_per_pack(PackSize::Ml500), 16.0);
        assert_eq!(summary.total_cost_per_pack(PackSize::L1), 20.0);
        assert_eq!(summary.total_cost_per_pack(PackSize::L5), 125.0);
    }

    #[test]
    fn offered_sizes_require_positive_packaging() {
        let summary = summarize(&scale(&single_line(), 10.0).unwrap());
        assert_eq!(
            summary.offered_pack_sizes(),
            vec![PackSize::Ml500, PackSize::L5]
        );

        let bare = FormulationBuilder::new(4, "bare")
            .base_yield(1.0)
            .ingredient("A", "KG", 1.0, 1.0)
            .build();
        let summary = summarize(&scale(&bare, 1.0).unwrap());
        assert!(summary.offered_pack_sizes().is_empty());
        // Still computable even when not offered.
        assert_eq!(summary.total_cost_per_pack(PackSize::L5), 5.0);
    }

    #[test]
    fn pack_lines_for_offered_sizes() {
        let summary = summarize(&scale(&single_line(), 10.0).unwrap());
        let lines = summary.pack_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            PackLine {
                size: PackSize::L5,
                product_cost: 100.0,
                packaging_cost: 25.0,
                total_cost: 125.0,
            }
        );
    }

    #[test]
    fn summary_serializes_without_private_fields() {
        let summary = summarize(&scale(&single_line(), 10.0).unwrap());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["cost_per_unit"], 20.0);
        assert!(json.get("packaging").is_none());
    }
}
