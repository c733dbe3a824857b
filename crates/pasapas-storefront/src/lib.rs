//! Pas à Pas storefront.
//!
//! The application layer between the views and the backend: a
//! [`Storefront`] context shared by every view, the catalog browser, the
//! product page, the cart with checkout, payment and confirmation, and the
//! client and seller dashboards.
//!
//! # Example
//!
//! ```rust,ignore
//! use pasapas_storefront::prelude::*;
//!
//! let mut sf = Storefront::open(api, cache)?;
//! let mut browser = sf.browse().await?;
//! browser.select(Dimension::Brand, "Nike");
//! for product in browser.results().items {
//!     println!("{}", product.display_name());
//! }
//! ```

pub mod browser;
pub mod cart;
pub mod confirmation;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod payment;
pub mod product;

pub use browser::{CatalogBrowser, Dimension};
pub use cart::CartStore;
pub use confirmation::OrderConfirmation;
pub use context::{Landing, Storefront};
pub use dashboard::{ClientDashboard, SellerDashboard, SuccessBanner};
pub use error::{Result, StorefrontError};
pub use payment::PaymentStep;
pub use product::ProductDetail;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartStore, CatalogBrowser, ClientDashboard, Dimension, Landing, OrderConfirmation,
        PaymentStep, ProductDetail, SellerDashboard, Storefront, StorefrontError,
    };
}
