//! Cart store.
//!
//! Owns the shopper's [`Cart`] and writes it to the cache after every
//! change, so it survives between runs the way the browser cart survives a
//! reload.

use crate::error::{Result, StorefrontError};
use pasapas_auth::AuthSession;
use pasapas_cache::{cache_key, Cache, Slot};
use pasapas_commerce::cart::{Cart, CartPricing};
use pasapas_commerce::catalog::{Product, Stock};
use pasapas_commerce::checkout::OrderRef;
use pasapas_commerce::ids::VariantId;
use pasapas_data::StorefrontApi;

/// The persisted cart.
#[derive(Debug)]
pub struct CartStore {
    slot: Slot<Cart>,
    cart: Cart,
}

impl CartStore {
    /// Load the saved cart, or start an empty one.
    pub fn open(cache: Cache) -> Result<Self> {
        let slot = Slot::new(cache, cache_key!("cart", "current"));
        let cart = match slot.load() {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "saved cart unreadable, starting empty");
                Cart::default()
            }
        };
        Ok(Self { slot, cart })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines on the cart badge.
    pub fn badge(&self) -> usize {
        self.cart.line_count()
    }

    pub fn pricing(&self) -> Result<CartPricing> {
        Ok(self.cart.calculate_pricing()?)
    }

    /// Append a line. Duplicates of the same variant are kept as separate lines.
    pub fn add(&mut self, product: &Product, variant: &Stock, quantity: i64) -> Result<()> {
        self.cart.add(product, variant, quantity);
        self.persist()
    }

    /// Drop every line for `variant_id`.
    pub fn remove(&mut self, variant_id: &VariantId) -> Result<usize> {
        let removed = self.cart.remove(variant_id);
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Set a quantity, never below one.
    pub fn update_quantity(&mut self, variant_id: &VariantId, quantity: i64) -> Result<bool> {
        let found = self.cart.update_quantity(variant_id, quantity);
        if found {
            self.persist()?;
        }
        Ok(found)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.cart.clear();
        self.persist()
    }

    /// Submit the cart as an order.
    ///
    /// Fails without touching the network when nobody is logged in or the
    /// cart is empty. The cart is cleared only once the order exists.
    pub async fn checkout(
        &mut self,
        api: &dyn StorefrontApi,
        session: &AuthSession,
    ) -> Result<OrderRef> {
        let (user, token) = session.require_user()?;
        let request = self.cart.order_request(&user.id)?;

        let order = api.create_order(token, &request).await.map_err(|e| {
            tracing::error!(error = %e, "order creation failed");
            StorefrontError::from_backend(e, "Unable to place the order.")
        })?;

        tracing::info!(order = %order.id, lines = request.items.len(), "order created");
        self.clear()?;
        Ok(order)
    }

    fn persist(&self) -> Result<()> {
        self.slot.save(&self.cart)?;
        Ok(())
    }
}
