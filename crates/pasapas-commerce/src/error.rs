//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Variant not found on the product.
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    /// Variant exists but cannot be bought.
    #[error("Variant {0} is not available")]
    VariantUnavailable(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Cart has nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Required form fields left blank.
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl CommerceError {
    /// Fail with [`CommerceError::MissingFields`] naming every blank field.
    ///
    /// `fields` pairs a display label with the submitted value.
    pub fn require(fields: &[(&str, Option<&str>)]) -> Result<(), CommerceError> {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
            .map(|(label, _)| *label)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::MissingFields(missing.join(", ")))
        }
    }
}
