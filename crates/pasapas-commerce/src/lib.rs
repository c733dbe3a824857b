//! Storefront domain types and logic for Pas à Pas.
//!
//! This crate is pure: no I/O, no clocks. It provides:
//!
//! - **Catalog**: Products, stock variants, listing payloads, and the one
//!   place where response envelopes are normalized
//! - **Search**: Cascading filter options, the filter engine, pagination
//! - **Cart**: Cart lines, quantities, totals, order payloads
//! - **Checkout**: Orders, order lines, payment outcomes
//! - **Account**: Client and seller profiles
//!
//! # Example
//!
//! ```rust,ignore
//! use pasapas_commerce::prelude::*;
//!
//! let catalog = normalize::product_list(body);
//! let mut filters = FilterState::new().with_brand("Nike");
//! let options = filters.reconcile(&catalog);
//!
//! let query = SearchQuery::new().with_term("air").with_filters(filters);
//! let hits = query.apply(&catalog, &options.price_range);
//! let page = SearchResults::paginate(&hits, 1, PAGE_SIZE);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod wire;

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{parse_price, Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{parse_price, Currency, Money};

    // Catalog
    pub use crate::catalog::{normalize, Availability, NewProduct, NewStock, Product, Stock};

    // Search
    pub use crate::search::{
        FilterOptions, FilterState, Pagination, PriceRange, SearchQuery, SearchResults,
        Selection, PAGE_SIZE,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing};

    // Checkout
    pub use crate::checkout::{
        LineStatusUpdate, Order, OrderItem, OrderLine, OrderRef, OrderRequest,
        OrderStatusUpdate, PaymentIntent, PaymentOutcome,
    };

    // Account
    pub use crate::account::{ClientProfile, SellerProfile};
}
