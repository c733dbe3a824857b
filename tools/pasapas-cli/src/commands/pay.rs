//! Payment and order confirmation.

use anyhow::Result;
use pasapas_commerce::checkout::PaymentOutcome;
use pasapas_commerce::ids::OrderId;
use serde_json::json;

use super::{ConfirmArgs, PayArgs, PayCommand};
use crate::context::Context;
use crate::output::{or_dash, status_badge};

/// Run the pay command.
pub async fn run(args: PayArgs, ctx: &Context) -> Result<()> {
    let mut sf = ctx.storefront()?;
    let mut step = sf.payment()?;

    match args.command {
        PayCommand::Prepare { order } => {
            let order = OrderId::new(order);
            let spinner = ctx.output.spinner("Requesting the payment...");
            let prepared = sf.prepare_payment(&mut step, &order).await;
            spinner.finish_and_clear();
            prepared?;

            let secret = step.client_secret().unwrap_or_default();
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "order": order,
                    "publishable_key": step.publishable_key(),
                    "client_secret": secret,
                }));
                return Ok(());
            }
            ctx.output.success(&format!("Payment ready for order {}", order));
            ctx.output.kv("publishable_key", step.publishable_key());
            ctx.output.kv("client_secret", secret);
            ctx.output.info(
                "Complete the payment in the widget, then run `pasapas pay finish --status <status>`",
            );
        }
        PayCommand::Finish { status, error } => {
            let outcome = PaymentOutcome::from_widget(error.as_deref(), status.as_deref());
            let outcome = sf.finish_payment(&step, outcome)?;
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "success": outcome.is_success(),
                    "message": outcome.message(),
                }));
                return Ok(());
            }
            match outcome {
                PaymentOutcome::Succeeded => ctx.output.success(outcome.message()),
                PaymentOutcome::Processing => ctx.output.info(outcome.message()),
                PaymentOutcome::Failed(_) => ctx.output.error(outcome.message()),
            }
        }
    }

    Ok(())
}

/// Run the confirm command.
pub async fn confirm(args: ConfirmArgs, ctx: &Context) -> Result<()> {
    let sf = ctx.storefront()?;
    let spinner = ctx.output.spinner("Loading your order...");
    let loaded = sf.confirmation(&OrderId::new(args.order)).await;
    spinner.finish_and_clear();
    let confirmation = loaded?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "order": confirmation.order,
            "client": confirmation.client,
            "total": confirmation.total(),
        }));
        return Ok(());
    }

    ctx.output
        .header(&format!("Thank you, {}", confirmation.recipient()));
    ctx.output.kv("order", confirmation.order.id.as_str());
    ctx.output
        .kv("status", &status_badge(confirmation.order.status.as_deref()));
    ctx.output
        .kv("placed", or_dash(confirmation.order.placed_at.as_deref()));

    let widths = [28, 6, 4, 10];
    for line in confirmation.lines() {
        let name = match (line.brand.as_deref(), line.model.as_deref()) {
            (Some(brand), Some(model)) => format!("{} - {}", brand, model),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => line.id.to_string(),
        };
        ctx.output.table_row(
            &[
                &name,
                or_dash(line.size.as_deref()),
                &line.quantity.to_string(),
                or_dash(line.unit_price.as_deref()),
            ],
            &widths,
        );
    }
    ctx.output.kv("total", &confirmation.total());

    Ok(())
}
