//! Cart commands.

use anyhow::Result;
use pasapas_commerce::checkout::OrderRef;
use pasapas_commerce::ids::VariantId;
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{or_dash, Output};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut sf = ctx.storefront()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Remove { variant } => {
            let removed = sf.cart_mut().remove(&VariantId::new(&variant))?;
            if removed == 0 {
                ctx.output.warn(&format!("{} is not in your cart", variant));
            } else {
                ctx.output.success(&format!("Removed {}", variant));
            }
        }
        CartCommand::Update { variant, quantity } => {
            if sf.cart_mut().update_quantity(&VariantId::new(&variant), quantity)? {
                ctx.output.success(&format!("{} set to {}", variant, quantity));
            } else {
                ctx.output.warn(&format!("{} is not in your cart", variant));
            }
        }
        CartCommand::Clear => {
            sf.cart_mut().clear()?;
            ctx.output.success("Cart emptied");
            return Ok(());
        }
        CartCommand::Checkout => {
            let spinner = ctx.output.spinner("Placing your order...");
            let placed = sf.checkout().await;
            spinner.finish_and_clear();
            let order = placed?;

            report_placed(&order, &ctx.output);
            return Ok(());
        }
    }

    show(&sf, ctx)
}

/// The order as JSON, or a confirmation with the payment hint.
fn report_placed(order: &OrderRef, output: &Output) {
    if output.is_json() {
        output.json(order);
        return;
    }
    let (placed, hint) = placed_lines(order);
    output.success(&placed);
    output.info(&hint);
}

fn placed_lines(order: &OrderRef) -> (String, String) {
    (
        format!("Order {} placed", order.id),
        format!("Pay with `pasapas pay prepare {}`", order.id),
    )
}

fn show(sf: &pasapas_storefront::Storefront, ctx: &Context) -> Result<()> {
    let cart = sf.cart().cart();
    let pricing = sf.cart().pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cart": cart, "pricing": pricing }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", sf.cart().badge()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    let widths = [10, 32, 6, 4, 12];
    for (line, priced) in cart.lines.iter().zip(&pricing.lines) {
        let subtotal = priced
            .subtotal
            .as_ref()
            .map(|m| m.display())
            .unwrap_or_else(|| "-".to_string());
        ctx.output.table_row(
            &[
                line.variant_id.as_str(),
                &line.display_name(),
                or_dash(line.size.as_deref()),
                &line.quantity.to_string(),
                &subtotal,
            ],
            &widths,
        );
    }
    for unpriced in pricing.unpriced() {
        ctx.output
            .warn(&format!("{} has no usable price", unpriced.variant_id));
    }
    ctx.output.kv("total", &pricing.total.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasapas_commerce::ids::OrderId;

    fn placed() -> OrderRef {
        OrderRef {
            id: OrderId::new("17"),
        }
    }

    #[test]
    fn test_placed_lines_name_the_order() {
        let (placed, hint) = placed_lines(&placed());
        assert_eq!(placed, "Order 17 placed");
        assert_eq!(hint, "Pay with `pasapas pay prepare 17`");
    }

    #[test]
    fn test_json_report_is_the_order_only() {
        let order = placed();
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value, json!({ "id_commande": 17 }));
        report_placed(&order, &Output::new(true));
        report_placed(&order, &Output::new(false));
    }
}
