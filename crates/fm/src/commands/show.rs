//! `fm show` -- a formulation scaled to a yield, with its cost summary.

use anyhow::{Context, Result, bail};
use serde::Serialize;

use formulary_core::formulation::Formulation;
use formulary_core::ingredient::Ingredient;
use formulary_core::price::ProductPrice;
use formulary_engine::cost::{CostSummary, PackLine, summarize};
use formulary_engine::display::{format_money, format_quantity};
use formulary_engine::scale::{ScaledFormulation, scale};
use formulary_ui::styles::{render_bold, render_category, render_money, render_muted};

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::{Align, format_optional_money, output_json, render_table};

/// One scaled ingredient line, with its derived amount.
#[derive(Serialize)]
struct IngredientView<'a> {
    line_no: u32,
    name: &'a str,
    unit: &'a str,
    quantity: f64,
    rate: f64,
    amount: f64,
}

impl<'a> IngredientView<'a> {
    fn from_ingredient(ing: &'a Ingredient) -> Self {
        Self {
            line_no: ing.line_no,
            name: &ing.name,
            unit: &ing.unit,
            quantity: ing.quantity,
            rate: ing.rate,
            amount: ing.amount(),
        }
    }
}

#[derive(Serialize)]
struct ShowView<'a> {
    id: u32,
    slug: &'a str,
    name: &'a str,
    category: &'a str,
    base_yield: f64,
    factor: f64,
    ingredients: Vec<IngredientView<'a>>,
    summary: &'a CostSummary,
    packs: Vec<PackLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    preparation_steps: &'a Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<&'a ProductPrice>,
}

/// Execute the `fm show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let formulation = catalog
        .resolve(&args.formulation)
        .with_context(|| format!("formulation '{}' not found", args.formulation))?;

    let requested_yield = args.yield_quantity.unwrap_or(formulation.base_yield);
    if requested_yield < 0.0 {
        bail!("yield must not be negative (got {})", requested_yield);
    }

    let scaled = scale(formulation, requested_yield)?;
    let summary = summarize(&scaled);
    let price = catalog.price_for(&formulation.name);

    if ctx.json {
        let view = build_view(&scaled, &summary, price);
        output_json(&view);
        return Ok(());
    }

    print!("{}", render_report(&scaled, &summary, price));
    Ok(())
}

fn build_view<'a>(
    scaled: &'a ScaledFormulation,
    summary: &'a CostSummary,
    price: Option<&'a ProductPrice>,
) -> ShowView<'a> {
    let f = scaled.formulation();
    ShowView {
        id: f.id,
        slug: &f.slug,
        name: &f.name,
        category: &f.category,
        base_yield: f.base_yield,
        factor: scaled.factor(),
        ingredients: f
            .ingredients_by_line()
            .into_iter()
            .map(IngredientView::from_ingredient)
            .collect(),
        summary,
        packs: summary.pack_lines(),
        preparation_steps: &f.preparation_steps,
        price,
    }
}

/// Render the human-readable report.
fn render_report(
    scaled: &ScaledFormulation,
    summary: &CostSummary,
    price: Option<&ProductPrice>,
) -> String {
    let f = scaled.formulation();
    let mut out = String::new();

    out.push_str(&format!("{}\n", header_line(f)));
    out.push_str(&format!(
        "Yield: {} (base {}, factor {})\n",
        format_quantity(summary.requested_yield),
        format_quantity(f.base_yield),
        format_quantity(scaled.factor())
    ));
    if !f.description.is_empty() {
        out.push_str(&format!("{}\n", render_muted(&f.description)));
    }

    out.push('\n');
    out.push_str(&format!("{}\n", render_category("Ingredients")));

    let rows: Vec<Vec<String>> = f
        .ingredients_by_line()
        .into_iter()
        .map(|ing| {
            vec![
                ing.line_no.to_string(),
                ing.name.clone(),
                ing.unit.clone(),
                format_quantity(ing.quantity),
                format_money(ing.rate),
                format_money(ing.amount()),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["#", "MATERIAL", "UNIT", "QTY", "RATE", "AMOUNT"],
        &[
            Align::Right,
            Align::Left,
            Align::Left,
            Align::Right,
            Align::Right,
            Align::Right,
        ],
        &rows,
    ));

    out.push('\n');
    out.push_str(&format!("{}\n", render_category("Cost")));
    out.push_str(&format!(
        "Total quantity: {}\n",
        format_quantity(summary.total_quantity)
    ));
    out.push_str(&format!(
        "Total amount:   {}\n",
        render_money(&format_money(summary.total_amount))
    ));
    out.push_str(&format!(
        "Cost per unit:  {}\n",
        format_money(summary.cost_per_unit)
    ));

    let packs = summary.pack_lines();
    if !packs.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", render_category("Packs")));
        for pack in &packs {
            out.push_str(&format!("{}\n", format_pack_line(pack)));
        }
    }

    if let Some(price) = price {
        out.push('\n');
        out.push_str(&format!("{}\n", render_category("Price list")));
        out.push_str(&format!(
            "Retail: {}  Bulk: {}\n",
            format_optional_money(price.retail),
            format_optional_money(price.bulk)
        ));
    }

    if !f.preparation_steps.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", render_category("Preparation")));
        for (i, step) in f.preparation_steps.iter().enumerate() {
            out.push_str(&format!("{:>2}. {}\n", i + 1, step));
        }
    }

    out
}

fn header_line(f: &Formulation) -> String {
    let mut line = format!(
        "{} {}",
        render_bold(&f.name),
        render_muted(&format!("({}, #{})", f.slug, f.id))
    );
    if !f.category.is_empty() {
        line.push_str(&format!(" [{}]", f.category));
    }
    line
}

/// `1 L: product 12.45 + pack 9.00 = 21.45`
fn format_pack_line(pack: &PackLine) -> String {
    format!(
        "{:<7} product {} + pack {} = {}",
        format!("{}:", pack.size.label()),
        format_money(pack.product_cost),
        format_money(pack.packaging_cost),
        format_money(pack.total_cost)
    )
}
