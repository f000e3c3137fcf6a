//! `fm indent` -- aggregate raw-material demand across production runs.

use anyhow::{Context, Result, bail};
use serde::Serialize;

use formulary_core::catalog::{Catalog, FormulationSource};
use formulary_engine::display::{format_money, format_quantity};
use formulary_engine::indent::{Indent, IndentRequest, SkipReason, SkippedRequest, aggregate};
use formulary_ui::styles::{
    render_bold, render_money, render_muted, render_separator, render_warn, render_warn_icon,
};

use crate::cli::IndentArgs;
use crate::context::RuntimeContext;
use crate::output::{Align, format_indent_row, output_json, output_table};

/// A parsed `<id|slug>=<quantity>` argument.
#[derive(Debug, Clone, PartialEq)]
struct RunSpec {
    key: String,
    quantity: f64,
}

#[derive(Serialize)]
struct IndentView<'a> {
    #[serde(flatten)]
    indent: &'a Indent,
    /// Keys that matched no formulation id or slug.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unresolved: Vec<&'a str>,
}

/// Execute the `fm indent` command.
pub fn run(ctx: &RuntimeContext, args: &IndentArgs) -> Result<()> {
    let runs = args
        .runs
        .iter()
        .map(|raw| parse_run(raw))
        .collect::<Result<Vec<_>>>()?;

    let catalog = ctx.load_catalog()?;
    let (requests, unresolved) = resolve_runs(&catalog, &runs);

    let indent = aggregate(&catalog, &requests).context("failed to aggregate indent")?;

    if ctx.json {
        output_json(&IndentView {
            indent: &indent,
            unresolved,
        });
        return Ok(());
    }

    if !ctx.quiet {
        for key in &unresolved {
            eprintln!(
                "{} skipped '{}': no formulation with that id or slug",
                render_warn_icon(),
                key
            );
        }
        for skipped in &indent.skipped {
            eprintln!("{} {}", render_warn_icon(), describe_skip(&catalog, skipped));
        }
    }

    if indent.lines.is_empty() {
        if !ctx.quiet {
            println!("Nothing to procure.");
        }
        return Ok(());
    }

    let show_sources = args.sources || ctx.config.indent.show_sources;
    print_indent(&indent, show_sources);
    Ok(())
}

fn print_indent(indent: &Indent, show_sources: bool) {
    let mut headers = vec!["MATERIAL", "UNIT", "QTY", "RATE", "AMOUNT"];
    let mut align = vec![
        Align::Left,
        Align::Left,
        Align::Right,
        Align::Right,
        Align::Right,
    ];
    if show_sources {
        headers.push("SOURCES");
        align.push(Align::Left);
    }

    let rows: Vec<Vec<String>> = indent
        .lines
        .iter()
        .map(|line| {
            let mut row = format_indent_row(line);
            if line.rate_conflict {
                row[3] = format!("{}*", row[3]);
            }
            if show_sources {
                row.push(line.sources.join(", "));
            }
            row
        })
        .collect();
    output_table(&headers, &align, &rows);

    println!("{}", render_separator());
    println!(
        "{} {}",
        render_bold("Grand total:"),
        render_money(&format_money(indent.grand_total_amount))
    );

    if indent.lines.iter().any(|l| l.rate_conflict) {
        println!(
            "{}",
            render_warn("* listed at different rates; first-seen rate kept")
        );
    }
    println!(
        "{}",
        render_muted(&format!("{} material(s)", indent.lines.len()))
    );
}

/// Parse `<id|slug>=<quantity>`.
fn parse_run(raw: &str) -> Result<RunSpec> {
    let Some((key, qty)) = raw.split_once('=') else {
        bail!("invalid run '{}': expected <id|slug>=<quantity>", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("invalid run '{}': missing formulation id or slug", raw);
    }
    let quantity: f64 = qty
        .trim()
        .parse()
        .with_context(|| format!("invalid run '{}': quantity is not a number", raw))?;
    // Unresolved keys never reach `aggregate`, so non-finite input is
    // rejected before resolution.
    if !quantity.is_finite() {
        bail!("invalid run '{}': quantity must be finite", raw);
    }
    Ok(RunSpec {
        key: key.to_string(),
        quantity,
    })
}

/// Map run keys to engine requests. Keys that resolve to nothing are
/// returned separately since the engine only speaks formulation ids.
fn resolve_runs<'a>(
    catalog: &Catalog,
    runs: &'a [RunSpec],
) -> (Vec<IndentRequest>, Vec<&'a str>) {
    let mut requests = Vec::with_capacity(runs.len());
    let mut unresolved = Vec::new();
    for run in runs {
        match catalog.resolve(&run.key) {
            Some(f) => requests.push(IndentRequest::new(f.id, run.quantity)),
            None => unresolved.push(run.key.as_str()),
        }
    }
    (requests, unresolved)
}

fn describe_skip<S: FormulationSource + ?Sized>(source: &S, skipped: &SkippedRequest) -> String {
    let id = skipped.request.formulation_id;
    let label = source
        .get(id)
        .map(|f| f.slug.clone())
        .unwrap_or_else(|| format!("#{}", id));
    match skipped.reason {
        SkipReason::NonPositiveQuantity => format!(
            "skipped '{}': quantity {} is not positive",
            label,
            format_quantity(skipped.request.quantity)
        ),
        SkipReason::UnknownFormulation => {
            format!("skipped '{}': unknown formulation", label)
        }
    }
}
