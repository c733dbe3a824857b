//! Shopping cart module.
//!
//! Contains the cart, its lines, and pricing.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine, MIN_QUANTITY};
pub use pricing::{CartPricing, LinePricing};
