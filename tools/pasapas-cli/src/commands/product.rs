//! Product page.

use anyhow::Result;
use pasapas_commerce::ids::{ProductId, VariantId};
use serde_json::json;

use super::{ProductArgs, ProductCommand};
use crate::context::Context;
use crate::output::or_dash;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductCommand::Show { id } => show(&id, ctx).await,
        ProductCommand::Add {
            id,
            variant,
            quantity,
        } => add(&id, &variant, quantity, ctx).await,
    }
}

async fn show(id: &str, ctx: &Context) -> Result<()> {
    let sf = ctx.storefront()?;
    let spinner = ctx.output.spinner("Loading product...");
    let loaded = sf.product(&ProductId::new(id)).await;
    spinner.finish_and_clear();
    let detail = loaded?;
    let product = detail.product();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "product": product, "image": detail.image() }));
        return Ok(());
    }

    ctx.output.header(&product.display_name());
    ctx.output.kv("color", or_dash(product.color.as_deref()));
    ctx.output.kv("released", or_dash(product.release_date.as_deref()));
    ctx.output.kv("image", or_dash(detail.image()));
    if let Some(description) = product.description.as_deref() {
        ctx.output.kv("description", description);
    }

    ctx.output.header("Sizes");
    if product.stocks.is_empty() {
        ctx.output.info("No size listed yet.");
    }
    let widths = [10, 16, 10, 14];
    for stock in &product.stocks {
        ctx.output.table_row(
            &[
                stock.id.as_str(),
                &stock.label(),
                or_dash(stock.price.as_deref()),
                stock.availability.label(),
            ],
            &widths,
        );
    }

    Ok(())
}

async fn add(id: &str, variant: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let mut sf = ctx.storefront()?;
    let mut detail = sf.product(&ProductId::new(id)).await?;
    let label = detail.select_variant(&VariantId::new(variant))?.label();

    if let Err(err) = sf.add_to_cart(&detail, quantity) {
        if err.requires_login() {
            ctx.output.warn(&format!(
                "Log in with `pasapas auth login`, then return to {}",
                detail.return_path()
            ));
        }
        return Err(err.into());
    }

    ctx.output.success(&format!(
        "Added {} x {} {} to your cart ({} items)",
        quantity,
        detail.product().display_name(),
        label,
        sf.cart().badge()
    ));
    Ok(())
}
