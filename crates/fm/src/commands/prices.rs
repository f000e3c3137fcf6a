//! `fm prices` -- show the companion retail/bulk price list.

use anyhow::{Result, bail};

use formulary_core::price::ProductPrice;

use crate::cli::PricesArgs;
use crate::context::RuntimeContext;
use crate::output::{Align, format_optional_money, output_json, output_table};

/// Execute the `fm prices` command.
pub fn run(ctx: &RuntimeContext, args: &PricesArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;

    let prices: Vec<&ProductPrice> = match args.product.as_deref() {
        Some(product) => match catalog.price_for(product) {
            Some(price) => vec![price],
            None => bail!("no price listed for '{}'", product),
        },
        None => catalog.prices().iter().collect(),
    };

    if ctx.json {
        output_json(&prices);
        return Ok(());
    }

    if prices.is_empty() {
        if !ctx.quiet {
            println!("No prices listed.");
        }
        return Ok(());
    }

    output_table(
        &["PRODUCT", "RETAIL", "BULK"],
        &[Align::Left, Align::Right, Align::Right],
        &price_rows(&prices),
    );
    Ok(())
}

fn price_rows(prices: &[&ProductPrice]) -> Vec<Vec<String>> {
    prices
        .iter()
        .map(|p| {
            vec![
                p.product.clone(),
                format_optional_money(p.retail),
                format_optional_money(p.bulk),
            ]
        })
        .collect()
}
