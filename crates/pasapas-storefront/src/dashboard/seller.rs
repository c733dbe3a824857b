//! Seller dashboard.

use super::{OrderDetails, SuccessBanner};
use crate::context::Storefront;
use crate::error::{Result, StorefrontError};
use pasapas_auth::Role;
use pasapas_commerce::account::SellerProfile;
use pasapas_commerce::catalog::{NewProduct, Product};
use pasapas_commerce::checkout::{LineStatusUpdate, Order, OrderStatusUpdate};
use pasapas_commerce::ids::{OrderId, OrderLineId, ProductId};
use pasapas_data::FetchError;

const LOAD_FAILED: &str = "Unable to load your shop.";

/// Profile, orders and listings of the logged-in seller.
#[derive(Debug, Clone, Default)]
pub struct SellerDashboard {
    pub profile: SellerProfile,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    details: OrderDetails,
    banner: SuccessBanner,
}

impl SellerDashboard {
    /// Fetch profile, orders and products together.
    pub async fn load(sf: &Storefront) -> Result<Self> {
        let token = sf.token_for(Role::Seller)?;
        let api = sf.api();
        let (profile, orders, products) = futures::join!(
            api.seller_profile(token),
            api.seller_orders(token),
            api.seller_products(token)
        );

        let fail = |what: &'static str| {
            move |e: FetchError| {
                tracing::error!(error = %e, "seller {} fetch failed", what);
                StorefrontError::from_backend(e, LOAD_FAILED)
            }
        };
        Ok(Self {
            profile: profile.map_err(fail("profile"))?,
            orders: orders.map_err(fail("orders"))?,
            products: products.map_err(fail("products"))?,
            ..Self::default()
        })
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.message()
    }

    /// Order with its lines, fetched once per session.
    pub async fn order_detail(&mut self, sf: &Storefront, id: &OrderId) -> Result<&Order> {
        if self.details.get(id).is_none() {
            let token = sf.token_for(Role::Seller)?;
            let order = sf
                .api()
                .seller_order(token, id)
                .await
                .map_err(|e| StorefrontError::from_backend(e, "Unable to load the order."))?;
            self.details.insert(order);
        }
        self.details
            .get(id)
            .ok_or_else(|| StorefrontError::Validation(format!("Order not found: {}", id)))
    }

    /// Move an order to `status`.
    pub async fn update_order_status(
        &mut self,
        sf: &Storefront,
        id: &OrderId,
        status: &str,
    ) -> Result<()> {
        let token = sf.token_for(Role::Seller)?;
        let body = OrderStatusUpdate {
            status: status.to_string(),
        };
        let echoed = sf
            .api()
            .update_order_status(token, id, &body)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to update the order."))?;

        let mut update = echoed.unwrap_or_else(|| Order::new(id.clone()));
        update.status.get_or_insert_with(|| status.to_string());
        for order in self.orders.iter_mut().filter(|o| &o.id == id) {
            order.merge(update.clone());
        }
        if let Some(detail) = self.details.get_mut(id) {
            detail.merge(update);
        }
        tracing::info!(order = %id, status, "order status updated");
        self.banner.show("Order status updated");
        Ok(())
    }

    /// Move one line of an order to `status`.
    pub async fn update_line_status(
        &mut self,
        sf: &Storefront,
        order: &OrderId,
        line: &OrderLineId,
        status: &str,
    ) -> Result<()> {
        let token = sf.token_for(Role::Seller)?;
        let body = LineStatusUpdate {
            status: status.to_string(),
        };
        let echoed = sf
            .api()
            .update_line_status(token, order, line, &body)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to update the line."))?;

        let status = echoed
            .and_then(|l| l.status)
            .unwrap_or_else(|| status.to_string());
        for o in self.orders.iter_mut().filter(|o| &o.id == order) {
            o.set_line_status(line, &status);
        }
        if let Some(detail) = self.details.get_mut(order) {
            detail.set_line_status(line, &status);
        }
        tracing::info!(%order, %line, %status, "order line status updated");
        self.banner.show("Line status updated");
        Ok(())
    }

    /// List a new product, then create each of its variants.
    ///
    /// Stops at the first variant the backend refuses; the product and the
    /// variants created so far stay listed.
    pub async fn create_product(&mut self, sf: &Storefront, listing: NewProduct) -> Result<ProductId> {
        listing.validate()?;
        let token = sf.token_for(Role::Seller)?;
        let api = sf.api();

        let mut product = api
            .create_product(token, &listing)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to create the product."))?;

        let mut failure = None;
        for stock in &listing.stocks {
            match api.create_stock(token, &product.id, stock).await {
                Ok(Some(created)) => product.stocks.push(created),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(product = %product.id, error = %e, "stock creation failed");
                    failure = Some(StorefrontError::from_backend(e, "Unable to add a size."));
                    break;
                }
            }
        }

        let id = product.id.clone();
        tracing::info!(product = %id, stocks = product.stocks.len(), "product created");
        self.products.push(product);
        match failure {
            Some(err) => Err(err),
            None => {
                self.banner.show("Product created");
                Ok(id)
            }
        }
    }

    pub async fn delete_product(&mut self, sf: &Storefront, id: &ProductId) -> Result<()> {
        let token = sf.token_for(Role::Seller)?;
        sf.api()
            .delete_product(token, id)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to delete the product."))?;
        self.products.retain(|p| &p.id != id);
        tracing::info!(product = %id, "product deleted");
        self.banner.show("Product deleted");
        Ok(())
    }

    pub async fn update_profile(&mut self, sf: &Storefront, update: SellerProfile) -> Result<()> {
        let token = sf.token_for(Role::Seller)?;
        let mut next = self.profile.clone();
        next.merge(update);
        next.validate()?;

        let echoed = sf
            .api()
            .update_seller_profile(token, &next)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to update the profile."))?;
        self.profile = next;
        if let Some(echoed) = echoed {
            self.profile.merge(echoed);
        }
        tracing::info!("seller profile updated");
        self.banner.show("Profile updated");
        Ok(())
    }

    /// Delete the account, then log out.
    pub async fn delete_profile(self, sf: &mut Storefront) -> Result<()> {
        let token = sf.token_for(Role::Seller)?;
        sf.api()
            .delete_seller_profile(token)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to delete the profile."))?;
        tracing::info!("seller profile deleted");
        sf.session_mut().logout()?;
        Ok(())
    }
}
