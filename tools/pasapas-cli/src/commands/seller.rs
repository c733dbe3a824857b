//! Seller dashboard commands.

use anyhow::Result;
use pasapas_commerce::account::SellerProfile;
use pasapas_commerce::catalog::{NewProduct, Product};
use pasapas_commerce::ids::{OrderId, OrderLineId, ProductId};
use pasapas_storefront::SellerDashboard;
use serde_json::json;

use super::client::{confirm_delete, prompt_field, show_order, show_orders};
use super::{SellerArgs, SellerCommand};
use crate::context::Context;
use crate::output::{or_dash, Output};

/// Run the seller command.
pub async fn run(args: SellerArgs, ctx: &Context) -> Result<()> {
    let mut sf = ctx.storefront()?;

    let command = match args.command.unwrap_or(SellerCommand::Show) {
        SellerCommand::CreateProfile(fields) => {
            let mut profile = SellerProfile::from(fields);
            if !ctx.output.is_json() {
                prompt_missing(&mut profile)?;
            }
            let saved = sf.create_seller_profile(&profile).await?;
            ctx.output.success(&format!(
                "Shop {} is ready",
                or_dash(saved.company_name.as_deref())
            ));
            return Ok(());
        }
        other => other,
    };

    let spinner = ctx.output.spinner("Loading your shop...");
    let loaded = SellerDashboard::load(&sf).await;
    spinner.finish_and_clear();
    let mut dash = loaded?;

    match command {
        SellerCommand::Show | SellerCommand::CreateProfile(_) => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "profile": dash.profile,
                    "orders": dash.orders,
                    "products": dash.products,
                }));
                return Ok(());
            }
            show_profile(&dash.profile, &ctx.output);
            show_orders(&dash.orders, &ctx.output);
            show_products(&dash.products, &ctx.output);
        }
        SellerCommand::Order { id } => {
            let order = dash.order_detail(&sf, &OrderId::new(id)).await?;
            if ctx.output.is_json() {
                ctx.output.json(order);
                return Ok(());
            }
            show_order(order, &ctx.output);
        }
        SellerCommand::Status { order, status } => {
            dash.update_order_status(&sf, &OrderId::new(order), &status)
                .await?;
            ctx.output
                .success(dash.banner().unwrap_or("Order status updated"));
        }
        SellerCommand::LineStatus {
            order,
            line,
            status,
        } => {
            dash.update_line_status(&sf, &OrderId::new(order), &OrderLineId::new(line), &status)
                .await?;
            ctx.output
                .success(dash.banner().unwrap_or("Line status updated"));
        }
        SellerCommand::AddProduct {
            brand,
            model,
            color,
            description,
            release_date,
            images,
            stocks,
        } => {
            let mut images = images.into_iter();
            let listing = NewProduct {
                brand,
                model,
                color,
                description,
                release_date,
                image_1: images.next(),
                image_2: images.next(),
                image_3: images.next(),
                stocks,
            };
            let spinner = ctx.output.spinner("Creating the product...");
            let created = dash.create_product(&sf, listing).await;
            spinner.finish_and_clear();
            let id = created?;
            ctx.output.success(&format!("Product {} created", id));
        }
        SellerCommand::DeleteProduct { id } => {
            dash.delete_product(&sf, &ProductId::new(id)).await?;
            ctx.output.success(dash.banner().unwrap_or("Product deleted"));
        }
        SellerCommand::Update(fields) => {
            dash.update_profile(&sf, fields.into()).await?;
            ctx.output.success(dash.banner().unwrap_or("Profile updated"));
            show_profile(&dash.profile, &ctx.output);
        }
        SellerCommand::Delete { yes } => {
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

fn show_profile(profile: &SellerProfile, output: &Output) {
    output.header(or_dash(profile.company_name.as_deref()));
    output.kv("owner", &profile.full_name());
    output.kv("siret", or_dash(profile.siret.as_deref()));
    output.kv("head office", or_dash(profile.head_office_address.as_deref()));
    output.kv("city", or_dash(profile.city.as_deref()));
    output.kv("postal code", or_dash(profile.postal_code.as_deref()));
    output.kv("email", or_dash(profile.contact_email.as_deref()));
    output.kv("phone", or_dash(profile.contact_phone.as_deref()));
}

fn show_products(products: &[Product], output: &Output) {
    output.header(&format!("Products ({})", products.len()));
    let widths = [8, 36, 24];
    for product in products {
        let sizes: Vec<String> = product.stocks.iter().map(|s| s.label()).collect();
        output.table_row(
            &[product.id.as_str(), &product.display_name(), &sizes.join(", ")],
            &widths,
        );
    }
}

fn prompt_missing(profile: &mut SellerProfile) -> Result<()> {
    let fields = [
        ("Last name", &mut profile.last_name),
        ("First name", &mut profile.first_name),
        ("Company name", &mut profile.company_name),
        ("City", &mut profile.city),
        ("Postal code", &mut profile.postal_code),
    ];
    for (label, value) in fields {
        prompt_field(label, value)?;
    }
    Ok(())
}
