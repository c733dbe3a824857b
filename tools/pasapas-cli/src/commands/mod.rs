//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod pay;
pub mod product;
pub mod seller;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use pasapas_auth::Role;
use pasapas_commerce::account::{ClientProfile, SellerProfile};
use pasapas_commerce::catalog::{NewStock, AVAILABLE_LABEL};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Search term matched against brand and model.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Brand filter ("all" clears it).
    #[arg(long)]
    pub brand: Option<String>,

    /// Color filter.
    #[arg(long)]
    pub color: Option<String>,

    /// Size filter.
    #[arg(long)]
    pub size: Option<String>,

    /// Gender filter.
    #[arg(long)]
    pub gender: Option<String>,

    /// Lower price bound.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Upper price bound.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Page to show.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Show a product and its sizes
    Show {
        /// Product id.
        id: String,
    },
    /// Add a size of a product to the cart
    Add {
        /// Product id.
        id: String,

        /// Variant (stock) id.
        #[arg(long)]
        variant: String,

        /// Quantity to add.
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
}

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create an account
    Register {
        email: String,

        /// client or seller.
        #[arg(short, long, default_value = "client", value_parser = parse_role)]
        role: Role,

        /// Password (prompted when omitted).
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in and keep the session
    Login {
        email: String,

        /// Password (prompted when omitted).
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the session
    Logout,
    /// Show the logged-in user
    Whoami,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse()
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its total
    Show,
    /// Remove a variant from the cart
    Remove { variant: String },
    /// Change the quantity of a variant
    Update { variant: String, quantity: i64 },
    /// Empty the cart
    Clear,
    /// Place an order for the cart
    Checkout,
}

/// Arguments for the pay command.
#[derive(Args)]
pub struct PayArgs {
    #[command(subcommand)]
    pub command: PayCommand,
}

#[derive(Subcommand)]
pub enum PayCommand {
    /// Request the payment for an order
    Prepare { order: String },
    /// Report the payment widget's result
    Finish {
        /// Intent status reported by the widget.
        #[arg(long)]
        status: Option<String>,

        /// Error message reported by the widget.
        #[arg(long)]
        error: Option<String>,
    },
}

/// Arguments for the confirm command.
#[derive(Args)]
pub struct ConfirmArgs {
    /// Order id.
    pub order: String,
}

/// Client profile fields.
#[derive(Args, Default)]
pub struct ClientProfileArgs {
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl From<ClientProfileArgs> for ClientProfile {
    fn from(args: ClientProfileArgs) -> Self {
        ClientProfile {
            last_name: args.last_name,
            first_name: args.first_name,
            gender: args.gender,
            address: args.address,
            postal_code: args.postal_code,
            city: args.city,
            phone: args.phone,
        }
    }
}

/// Seller profile fields.
#[derive(Args, Default)]
pub struct SellerProfileArgs {
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub siret: Option<String>,
    #[arg(long)]
    pub rib: Option<String>,
    #[arg(long)]
    pub head_office_address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub contact_email: Option<String>,
    #[arg(long)]
    pub contact_phone: Option<String>,
}

impl From<SellerProfileArgs> for SellerProfile {
    fn from(args: SellerProfileArgs) -> Self {
        SellerProfile {
            last_name: args.last_name,
            first_name: args.first_name,
            company_name: args.company_name,
            siret: args.siret,
            rib: args.rib,
            head_office_address: args.head_office_address,
            city: args.city,
            postal_code: args.postal_code,
            contact_email: args.contact_email,
            contact_phone: args.contact_phone,
        }
    }
}

/// Arguments for the client command.
#[derive(Args)]
pub struct ClientArgs {
    #[command(subcommand)]
    pub command: Option<ClientCommand>,
}

#[derive(Subcommand)]
pub enum ClientCommand {
    /// Show profile and orders
    Show,
    /// Fill in the profile after registering
    CreateProfile(ClientProfileArgs),
    /// Show one order with its lines
    Order { id: String },
    /// Cancel an order
    Cancel { id: String },
    /// Change profile fields
    Update(ClientProfileArgs),
    /// Delete the account
    Delete {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the seller command.
#[derive(Args)]
pub struct SellerArgs {
    #[command(subcommand)]
    pub command: Option<SellerCommand>,
}

#[derive(Subcommand)]
pub enum SellerCommand {
    /// Show profile, orders and products
    Show,
    /// Fill in the shop profile after registering
    CreateProfile(SellerProfileArgs),
    /// Show one order with its lines
    Order { id: String },
    /// Change the status of an order
    Status { order: String, status: String },
    /// Change the status of one order line
    LineStatus {
        order: String,
        line: String,
        status: String,
    },
    /// List a new product
    AddProduct {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        release_date: Option<String>,
        /// Image URLs, up to three.
        #[arg(long = "image")]
        images: Vec<String>,
        /// Variant as SIZE:GENDER:PRICE[:AVAILABILITY], repeatable.
        #[arg(long = "stock", value_parser = parse_stock)]
        stocks: Vec<NewStock>,
    },
    /// Remove a product
    DeleteProduct { id: String },
    /// Change profile fields
    Update(SellerProfileArgs),
    /// Delete the account
    Delete {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Parse `SIZE:GENDER:PRICE[:AVAILABILITY]`.
pub fn parse_stock(raw: &str) -> Result<NewStock> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    match parts.as_slice() {
        [size, gender, price] => Ok(NewStock {
            size: size.to_string(),
            gender: gender.to_string(),
            price: price.to_string(),
            availability: AVAILABLE_LABEL.to_string(),
        }),
        [size, gender, price, availability] => Ok(NewStock {
            size: size.to_string(),
            gender: gender.to_string(),
            price: price.to_string(),
            availability: availability.to_string(),
        }),
        _ => Err(anyhow!(
            "expected SIZE:GENDER:PRICE[:AVAILABILITY], got '{}'",
            raw
        )),
    }
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Write a default pasapas.toml in the current directory
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
