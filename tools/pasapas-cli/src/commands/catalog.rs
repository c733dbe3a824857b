//! Catalog browsing.

use anyhow::Result;
use pasapas_commerce::search::Selection;
use pasapas_commerce::{Currency, Money};
use pasapas_storefront::{CatalogBrowser, Dimension};
use serde_json::json;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::or_dash;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let sf = ctx.storefront()?;

    let spinner = ctx.output.spinner("Loading products...");
    let loaded = sf.browse().await;
    spinner.finish_and_clear();
    let mut browser = loaded?;

    apply(&mut browser, args);

    let results = browser.results();
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "filters": browser.filters(),
            "options": browser.options(),
            "products": results.items,
            "pagination": results.pagination,
        }));
        return Ok(());
    }

    let options = browser.options();
    ctx.output.header("Filters");
    ctx.output.kv("brands", &options.brands.join(", "));
    ctx.output.kv("colors", &options.colors.join(", "));
    ctx.output.kv("sizes", &options.sizes.join(", "));
    ctx.output.kv("genders", &options.genders.join(", "));
    if browser.price_enabled() {
        let range = &options.price_range;
        ctx.output
            .kv("price", &format!("{} - {}", euros(range.min), euros(range.max)));
    }

    let pagination = results.pagination;
    ctx.output.header(&format!(
        "Products {}-{} of {}",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total
    ));
    if results.is_empty() {
        ctx.output.info("No product matches your search.");
        return Ok(());
    }

    let widths = [8, 36, 12, 16];
    ctx.output.table_row(&["ID", "PRODUCT", "COLOR", "SIZES"], &widths);
    for product in &results.items {
        let sizes = product.sizes().join(" ");
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.display_name(),
                or_dash(product.color.as_deref()),
                &sizes,
            ],
            &widths,
        );
    }
    ctx.output.info(&format!(
        "Page {} of {}",
        pagination.page,
        pagination.total_pages.max(1)
    ));

    Ok(())
}

/// Replay the flags in the order a shopper would pick them, so each
/// selection narrows the options of the next.
fn apply(browser: &mut CatalogBrowser, args: CatalogArgs) {
    let dimensions = [
        (Dimension::Brand, args.brand),
        (Dimension::Color, args.color),
        (Dimension::Size, args.size),
        (Dimension::Gender, args.gender),
    ];
    for (dimension, value) in dimensions {
        if let Some(value) = value {
            browser.select(dimension, Selection::parse(&value));
        }
    }
    if let Some(term) = args.search {
        browser.set_term(&term);
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        browser.set_price(args.min_price, args.max_price);
    }
    browser.go_to_page(args.page);
}

fn euros(amount: f64) -> String {
    Money::from_decimal(amount, Currency::EUR).display()
}
