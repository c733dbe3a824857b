//! Client dashboard commands.

use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Input};
use pasapas_commerce::account::ClientProfile;
use pasapas_commerce::checkout::Order;
use pasapas_commerce::ids::OrderId;
use pasapas_storefront::ClientDashboard;
use serde_json::json;

use super::{ClientArgs, ClientCommand};
use crate::context::Context;
use crate::output::{or_dash, status_badge, Output};

/// Run the client command.
pub async fn run(args: ClientArgs, ctx: &Context) -> Result<()> {
    let mut sf = ctx.storefront()?;

    let command = match args.command.unwrap_or(ClientCommand::Show) {
        ClientCommand::CreateProfile(fields) => {
            let mut profile = ClientProfile::from(fields);
            if !ctx.output.is_json() {
                prompt_missing(&mut profile)?;
            }
            let saved = sf.create_client_profile(&profile).await?;
            ctx.output
                .success(&format!("Welcome, {}", saved.full_name()));
            return Ok(());
        }
        other => other,
    };

    let spinner = ctx.output.spinner("Loading your account...");
    let loaded = ClientDashboard::load(&sf).await;
    spinner.finish_and_clear();
    let mut dash = loaded?;

    match command {
        ClientCommand::Show | ClientCommand::CreateProfile(_) => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&json!({ "profile": dash.profile, "orders": dash.orders }));
                return Ok(());
            }
            show_profile(&dash.profile, &ctx.output);
            show_orders(&dash.orders, &ctx.output);
        }
        ClientCommand::Order { id } => {
            let order = dash.order_detail(&sf, &OrderId::new(id)).await?;
            if ctx.output.is_json() {
                ctx.output.json(order);
                return Ok(());
            }
            show_order(order, &ctx.output);
        }
        ClientCommand::Cancel { id } => {
            dash.cancel_order(&sf, &OrderId::new(id)).await?;
            ctx.output.success(dash.banner().unwrap_or("Order cancelled"));
        }
        ClientCommand::Update(fields) => {
            dash.update_profile(&sf, fields.into()).await?;
            ctx.output.success(dash.banner().unwrap_or("Profile updated"));
            show_profile(&dash.profile, &ctx.output);
        }
        ClientCommand::Delete { yes } => {
            if !yes && !confirm_delete()? {
                ctx.output.info("Nothing deleted");
                return Ok(());
            }
            dash.delete_profile(&mut sf).await?;
            ctx.output.success("Account deleted, you are logged out");
        }
    }

    Ok(())
}

fn show_profile(profile: &ClientProfile, output: &Output) {
    output.header(&profile.full_name());
    output.kv("gender", or_dash(profile.gender.as_deref()));
    output.kv("address", or_dash(profile.address.as_deref()));
    output.kv("postal code", or_dash(profile.postal_code.as_deref()));
    output.kv("city", or_dash(profile.city.as_deref()));
    output.kv("phone", or_dash(profile.phone.as_deref()));
}

/// One row per order.
pub fn show_orders(orders: &[Order], output: &Output) {
    output.header(&format!("Orders ({})", orders.len()));
    if orders.is_empty() {
        output.info("No order yet");
        return;
    }
    let widths = [8, 20, 12, 16];
    for order in orders {
        output.table_row(
            &[
                order.id.as_str(),
                or_dash(order.placed_at.as_deref()),
                &order.total_label(),
                &status_badge(order.status.as_deref()),
            ],
            &widths,
        );
    }
}

/// An order with its lines.
pub fn show_order(order: &Order, output: &Output) {
    output.header(&format!("Order {}", order.id));
    output.kv("status", &status_badge(order.status.as_deref()));
    output.kv("placed", or_dash(order.placed_at.as_deref()));
    output.kv("total", &order.total_label());
    let widths = [8, 28, 6, 4, 10, 14];
    for line in &order.lines {
        let name = format!(
            "{} {}",
            or_dash(line.brand.as_deref()),
            or_dash(line.model.as_deref())
        );
        output.table_row(
            &[
                line.id.as_str(),
                &name,
                or_dash(line.size.as_deref()),
                &line.quantity.to_string(),
                or_dash(line.unit_price.as_deref()),
                &status_badge(line.status.as_deref()),
            ],
            &widths,
        );
    }
}

pub fn confirm_delete() -> Result<bool> {
    Confirm::new()
        .with_prompt("Delete your account? This cannot be undone")
        .default(false)
        .interact()
        .context("Failed to read the confirmation")
}

/// Ask for each required field left empty on the command line.
fn prompt_missing(profile: &mut ClientProfile) -> Result<()> {
    let fields = [
        ("Last name", &mut profile.last_name),
        ("First name", &mut profile.first_name),
        ("Gender", &mut profile.gender),
        ("Postal code", &mut profile.postal_code),
        ("City", &mut profile.city),
        ("Phone", &mut profile.phone),
    ];
    for (label, value) in fields {
        prompt_field(label, value)?;
    }
    Ok(())
}

pub fn prompt_field(label: &str, value: &mut Option<String>) -> Result<()> {
    if value.as_deref().is_some_and(|v| !v.trim().is_empty()) {
        return Ok(());
    }
    let answer: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read {}", label))?;
    if !answer.trim().is_empty() {
        *value = Some(answer);
    }
    Ok(())
}
