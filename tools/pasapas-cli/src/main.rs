//! Pas à Pas CLI - shop for sneakers from the terminal.
//!
//! Commands:
//! - `pasapas catalog` - Browse, search and filter the catalog
//! - `pasapas product` - Show a product, add a size to the cart
//! - `pasapas auth` - Register, log in and out
//! - `pasapas cart` - Review the cart and check out
//! - `pasapas pay` - Pay for an order
//! - `pasapas confirm` - Show an order confirmation
//! - `pasapas client` - Client dashboard
//! - `pasapas seller` - Seller dashboard
//! - `pasapas config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AuthArgs, CartArgs, CatalogArgs, ClientArgs, ConfigArgs, ConfirmArgs, PayArgs, ProductArgs,
    SellerArgs,
};

/// Pas à Pas - sneaker storefront
#[derive(Parser)]
#[command(name = "pasapas")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog(CatalogArgs),

    /// Show a product or add it to the cart
    Product(ProductArgs),

    /// Register, log in and out
    Auth(AuthArgs),

    /// Review the cart and check out
    Cart(CartArgs),

    /// Pay for an order
    Pay(PayArgs),

    /// Show the confirmation of a paid order
    Confirm(ConfirmArgs),

    /// Client dashboard
    Client(ClientArgs),

    /// Seller dashboard
    Seller(SellerArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let output = output::Output::new(cli.json);
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Auth(args) => commands::auth::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Pay(args) => commands::pay::run(args, &ctx).await,
        Commands::Confirm(args) => commands::pay::confirm(args, &ctx).await,
        Commands::Client(args) => commands::client::run(args, &ctx).await,
        Commands::Seller(args) => commands::seller::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&user_facing(&e));
        std::process::exit(1);
    }

    Ok(())
}

/// The storefront's own wording when the error came from it, the full
/// context chain otherwise.
fn user_facing(err: &anyhow::Error) -> String {
    match err.downcast_ref::<pasapas_storefront::StorefrontError>() {
        Some(e) if e.requires_login() => {
            format!("{} Run `pasapas auth login` first.", e.user_message())
        }
        Some(e) => e.user_message(),
        None => format!("{:#}", err),
    }
}
