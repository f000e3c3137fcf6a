//! `fm list` -- list formulations in the catalog.

use anyhow::Result;

use formulary_core::catalog::FormulationSource;
use formulary_core::formulation::Formulation;
use formulary_engine::display::format_quantity;
use formulary_ui::styles::render_muted;
use formulary_ui::terminal::{is_tty, terminal_width};

use crate::cli::ListArgs;
use crate::context::RuntimeContext;
use crate::output::{Align, FormulationSummaryView, output_json, output_table, truncate};

const HEADERS: [&str; 5] = ["ID", "SLUG", "NAME", "CATEGORY", "YIELD"];
const ALIGN: [Align; 5] = [
    Align::Right,
    Align::Left,
    Align::Left,
    Align::Left,
    Align::Right,
];

/// Minimum width kept for the name column when truncating to the terminal.
const MIN_NAME_WIDTH: usize = 12;

/// Execute the `fm list` command.
pub fn run(ctx: &RuntimeContext, args: &ListArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;

    let formulations: Vec<&Formulation> = match args.category.as_deref() {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.formulations().iter().collect(),
    };

    if ctx.json {
        let views: Vec<FormulationSummaryView<'_>> = formulations
            .iter()
            .map(|f| FormulationSummaryView::from_formulation(f))
            .collect();
        output_json(&views);
        return Ok(());
    }

    if formulations.is_empty() {
        if !ctx.quiet {
            println!("No formulations found.");
        }
        return Ok(());
    }

    let name_width = if is_tty() {
        Some(name_budget(&formulations, terminal_width()))
    } else {
        None
    };

    let rows: Vec<Vec<String>> = formulations
        .iter()
        .map(|f| {
            let name = match name_width {
                Some(width) => truncate(&f.name, width),
                None => f.name.clone(),
            };
            vec![
                f.id.to_string(),
                f.slug.clone(),
                name,
                f.category.clone(),
                format_quantity(f.base_yield),
            ]
        })
        .collect();
    output_table(&HEADERS, &ALIGN, &rows);

    if !ctx.quiet {
        println!();
        println!(
            "{}",
            render_muted(&format!("{} formulation(s)", formulations.len()))
        );
    }
    Ok(())
}

/// Width left for the name column once the other columns are laid out.
fn name_budget(formulations: &[&Formulation], terminal_width: usize) -> usize {
    let widest = |f: fn(&Formulation) -> usize, header: &str| {
        formulations
            .iter()
            .map(|x| f(x))
            .max()
            .unwrap_or(0)
            .max(header.len())
    };
    let id = widest(|f: &Formulation| f.id.to_string().len(), HEADERS[0]);
    let slug = widest(|f: &Formulation| f.slug.chars().count(), HEADERS[1]);
    let category = widest(|f: &Formulation| f.category.chars().count(), HEADERS[3]);
    let yield_col = widest(|f: &Formulation| format_quantity(f.base_yield).len(), HEADERS[4]);

    // Four two-space gutters between five columns.
    let fixed = id + slug + category + yield_col + 8;
    terminal_width.saturating_sub(fixed).max(MIN_NAME_WIDTH)
}
