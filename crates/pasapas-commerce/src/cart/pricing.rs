//! Cart pricing calculations.

use crate::ids::VariantId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of every priced line.
    pub total: Money,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
}

impl CartPricing {
    /// Lines left out of the total because their price did not parse.
    pub fn unpriced(&self) -> impl Iterator<Item = &LinePricing> {
        self.lines.iter().filter(|l| l.unit_price.is_none())
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub variant_id: VariantId,
    /// Parsed unit price, `None` when the listed price is not a number.
    pub unit_price: Option<Money>,
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub subtotal: Option<Money>,
}
