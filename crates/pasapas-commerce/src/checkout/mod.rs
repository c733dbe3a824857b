//! Checkout module.
//!
//! Contains order payloads, order details, and payment outcomes.

mod order;
mod payment;

pub use order::{
    LineStatusUpdate, Order, OrderItem, OrderLine, OrderRef, OrderRequest, OrderStatusUpdate,
};
pub use payment::{PaymentIntent, PaymentOutcome, DEFAULT_DECLINE_MESSAGE};
