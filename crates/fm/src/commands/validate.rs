//! `fm validate` -- load the catalog and report whether every record is valid.
//!
//! Loading already runs every validation rule, so a successful load is a
//! clean bill of health. Failures surface through the normal error path.

use anyhow::Result;
use serde::Serialize;

use formulary_core::catalog::{Catalog, FormulationSource};
use formulary_ui::styles::render_pass_icon;

use crate::context::RuntimeContext;
use crate::output::output_json;

#[derive(Debug, Serialize, PartialEq)]
struct ValidationReport {
    valid: bool,
    formulations: usize,
    ingredients: usize,
    prices: usize,
}

impl ValidationReport {
    fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            valid: true,
            formulations: catalog.len(),
            ingredients: catalog
                .formulations()
                .iter()
                .map(|f| f.ingredients.len())
                .sum(),
            prices: catalog.prices().len(),
        }
    }
}

/// Execute the `fm validate` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let report = ValidationReport::from_catalog(&catalog);

    if ctx.json {
        output_json(&report);
    } else if !ctx.quiet {
        println!(
            "{} catalog OK: {} formulation(s), {} ingredient line(s), {} price(s)",
            render_pass_icon(),
            report.formulations,
            report.ingredients,
            report.prices
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulary_core::formulation::FormulationBuilder;
    use formulary_core::price::ProductPrice;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_counts_records() {
        let f = FormulationBuilder::new(1, "floor-cleaner")
            .ingredient("RO Water", "L", 9.0, 0.5)
            .ingredient("Pine Oil", "L", 1.0, 300.0)
            .build();
        let catalog = Catalog::new(
            vec![f],
            vec![ProductPrice::new("Floor Cleaner", Some(120.0), None)],
        )
        .unwrap();

        assert_eq!(
            ValidationReport::from_catalog(&catalog),
            ValidationReport {
                valid: true,
                formulations: 1,
                ingredients: 2,
                prices: 1,
            }
        );
    }
}
