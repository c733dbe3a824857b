//! Catalog module.
//!
//! Contains product and variant types, seller listing payloads, and the
//! normalization boundary for catalog responses.

mod listing;
pub mod normalize;
mod product;

pub use listing::{NewProduct, NewStock};
pub use product::{Availability, Product, Stock, AVAILABLE_LABEL};
