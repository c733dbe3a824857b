//! Cart and cart line types.

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::{Product, Stock};
use crate::checkout::{OrderItem, OrderRequest};
use crate::error::CommerceError;
use crate::ids::{ProductId, UserId, VariantId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Smallest quantity a cart line can hold.
pub const MIN_QUANTITY: i64 = 1;

/// A shopping cart.
///
/// Lines are kept in insertion order. Adding the same variant twice yields
/// two lines; removal and quantity updates apply to every line of a variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Lines in the cart.
    #[serde(default)]
    pub lines: Vec<CartLine>,
    /// Cart currency.
    #[serde(default)]
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line for `variant` of `product`.
    ///
    /// Quantities below one are raised to one.
    pub fn add(&mut self, product: &Product, variant: &Stock, quantity: i64) {
        let line = CartLine::new(product, variant, quantity);
        tracing::debug!(variant = %line.variant_id, quantity = line.quantity, "cart add");
        self.lines.push(line);
    }

    /// Remove every line for `variant_id`. Returns how many were removed.
    pub fn remove(&mut self, variant_id: &VariantId) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| &l.variant_id != variant_id);
        before - self.lines.len()
    }

    /// Set the quantity on every line for `variant_id`, clamped to at least one.
    ///
    /// Returns false when the variant is not in the cart.
    pub fn update_quantity(&mut self, variant_id: &VariantId, quantity: i64) -> bool {
        let quantity = quantity.max(MIN_QUANTITY);
        let mut found = false;
        for line in self.lines.iter_mut().filter(|l| &l.variant_id == variant_id) {
            line.quantity = quantity;
            found = true;
        }
        found
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines, as shown on the cart badge.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Find the first line for a variant.
    pub fn line(&self, variant_id: &VariantId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.variant_id == variant_id)
    }

    /// Price every line and total the cart.
    ///
    /// Lines whose price cannot be parsed count for zero and are listed in
    /// [`CartPricing::unpriced`].
    pub fn calculate_pricing(&self) -> Result<CartPricing, CommerceError> {
        let lines = self
            .lines
            .iter()
            .map(|line| line.pricing(self.currency))
            .collect::<Result<Vec<_>, _>>()?;

        let total = Money::try_sum(
            lines.iter().filter_map(|l| l.subtotal.as_ref()),
            self.currency,
        )
        .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing { total, lines })
    }

    /// Build the order payload for `client_id`.
    pub fn order_request(&self, client_id: &UserId) -> Result<OrderRequest, CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(OrderRequest {
            client_id: client_id.clone(),
            items: self.lines.iter().map(CartLine::order_item).collect(),
        })
    }
}

/// A variant in the cart with the product details it was added from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Variant being bought.
    pub variant_id: VariantId,
    /// Owning product.
    pub product_id: ProductId,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub gender: Option<String>,
    /// Primary image URL.
    pub image: Option<String>,
    /// Unit price exactly as listed.
    pub price: Option<String>,
    /// Quantity, never below one.
    pub quantity: i64,
}

impl CartLine {
    /// Merge product and variant fields into a line.
    ///
    /// Variant fields win over product fields of the same name.
    pub fn new(product: &Product, variant: &Stock, quantity: i64) -> Self {
        Self {
            variant_id: variant.id.clone(),
            product_id: product.id.clone(),
            brand: product.brand.clone(),
            model: product.model.clone(),
            color: variant.color.clone().or_else(|| product.color.clone()),
            size: variant.size.clone().or_else(|| product.size.clone()),
            gender: variant.gender.clone().or_else(|| product.gender.clone()),
            image: product.image_1.clone(),
            price: variant.price.clone().or_else(|| product.price.clone()),
            quantity: quantity.max(MIN_QUANTITY),
        }
    }

    /// "Brand - Model" label.
    pub fn display_name(&self) -> String {
        match (self.brand.as_deref(), self.model.as_deref()) {
            (Some(brand), Some(model)) => format!("{} - {}", brand, model),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => self.variant_id.to_string(),
        }
    }

    /// Parsed unit price.
    pub fn unit_price(&self, currency: Currency) -> Option<Money> {
        self.price
            .as_deref()
            .and_then(|raw| Money::from_price_str(raw, currency))
    }

    fn pricing(&self, currency: Currency) -> Result<LinePricing, CommerceError> {
        let unit_price = self.unit_price(currency);
        let subtotal = match unit_price {
            Some(unit) => Some(unit.try_multiply(self.quantity).ok_or(CommerceError::Overflow)?),
            None => None,
        };
        Ok(LinePricing {
            variant_id: self.variant_id.clone(),
            unit_price,
            quantity: self.quantity,
            subtotal,
        })
    }

    fn order_item(&self) -> OrderItem {
        OrderItem {
            variant_id: self.variant_id.clone(),
            quantity: self.quantity,
            unit_price: self.price.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> (Product, Stock, Stock) {
        let mut p = Product::new("7");
        p.brand = Some("Nike".into());
        p.model = Some("Air Max 90".into());
        p.color = Some("Red".into());
        p.image_1 = Some("https://cdn.example/7.jpg".into());

        let mut a = Stock::new("70");
        a.size = Some("42".into());
        a.gender = Some("Homme".into());
        a.price = Some("119,90 €".into());

        let mut b = Stock::new("71");
        b.size = Some("43".into());
        b.price = Some("100€".into());
        (p, a, b)
    }

    #[test]
    fn test_add_merges_product_and_variant() {
        let (p, a, _) = product();
        let mut cart = Cart::new();
        cart.add(&p, &a, 1);

        let line = &cart.lines[0];
        assert_eq!(line.product_id.as_str(), "7");
        assert_eq!(line.variant_id.as_str(), "70");
        assert_eq!(line.color.as_deref(), Some("Red"));
        assert_eq!(line.size.as_deref(), Some("42"));
        assert_eq!(line.display_name(), "Nike - Air Max 90");
    }

    #[test]
    fn test_duplicate_variant_lines_are_kept() {
        let (p, a, _) = product();
        let mut cart = Cart::new();
        cart.add(&p, &a, 1);
        cart.add(&p, &a, 2);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_remove_drops_every_matching_line() {
        let (p, a, b) = product();
        let mut cart = Cart::new();
        cart.add(&p, &a, 1);
        cart.add(&p, &b, 1);
        cart.add(&p, &a, 1);
        assert_eq!(cart.remove(&VariantId::new("70")), 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.remove(&VariantId::new("99")), 0);
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let (p, a, _) = product();
        let mut cart = Cart::new();
        cart.add(&p, &a, 3);

        assert!(cart.update_quantity(&VariantId::new("70"), 0));
        assert_eq!(cart.lines[0].quantity, 1);
        cart.update_quantity(&VariantId::new("70"), -4);
        assert_eq!(cart.lines[0].quantity, 1);
        cart.update_quantity(&VariantId::new("70"), 5);
        assert_eq!(cart.lines[0].quantity, 5);
        assert!(!cart.update_quantity(&VariantId::new("99"), 2));
    }

    #[test]
    fn test_add_clamps_quantity() {
        let (p, a, _) = product();
        let mut cart = Cart::new();
        cart.add(&p, &a, 0);
        assert_eq!(cart.lines[0].quantity, 1);
    }

    #[test]
    fn test_total() {
        let (p, a, b) = product();
        let mut cart = Cart::new();
        cart.add(&p, &a, 2);
        cart.add(&p, &b, 1);
        let pricing = cart.calculate_pricing().unwrap();
        assert_eq!(pricing.total.amount_cents, 33980);
        assert_eq!(pricing.total.display(), "339.80 €");
    }

    #[test]
    fn test_unpriced_lines_count_for_zero() {
        let (p, mut a, _) = product();
        a.price = Some("sur demande".into());
        let mut cart = Cart::new();
        cart.add(&p, &a, 1);
        let pricing = cart.calculate_pricing().unwrap();
        assert!(pricing.total.is_zero());
        assert_eq!(pricing.unpriced().count(), 1);
    }

    #[test]
    fn test_order_request_keeps_raw_price() {
        let (p, a, _) = product();
        let mut cart = Cart::new();
        cart.add(&p, &a, 2);
        let order = cart.order_request(&UserId::new("12")).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id_client": 12,
                "products": [{"child_id": 70, "quantite": 2, "prix_unitaire": "119,90 €"}]
            })
        );
    }

    #[test]
    fn test_order_request_rejects_empty_cart() {
        let err = Cart::new().order_request(&UserId::new("1")).unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
    }

    #[test]
    fn test_persisted_shape_round_trips() {
        let (p, a, _) = product();
        let mut cart = Cart::new();
        cart.add(&p, &a, 1);
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
