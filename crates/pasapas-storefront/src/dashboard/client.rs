//! Client dashboard.

use super::{OrderDetails, SuccessBanner};
use crate::context::Storefront;
use crate::error::{Result, StorefrontError};
use pasapas_auth::Role;
use pasapas_commerce::account::ClientProfile;
use pasapas_commerce::checkout::Order;
use pasapas_commerce::ids::OrderId;

const LOAD_FAILED: &str = "Unable to load your account.";

/// Profile and orders of the logged-in client.
#[derive(Debug, Clone, Default)]
pub struct ClientDashboard {
    pub profile: ClientProfile,
    pub orders: Vec<Order>,
    details: OrderDetails,
    banner: SuccessBanner,
}

impl ClientDashboard {
    /// Fetch the profile and the orders together.
    pub async fn load(sf: &Storefront) -> Result<Self> {
        let token = sf.token_for(Role::Client)?;
        let api = sf.api();
        let (profile, orders) = futures::join!(api.client_profile(token), api.client_orders(token));

        let profile = profile.map_err(|e| {
            tracing::error!(error = %e, "client profile fetch failed");
            StorefrontError::from_backend(e, LOAD_FAILED)
        })?;
        let orders = orders.map_err(|e| {
            tracing::error!(error = %e, "client orders fetch failed");
            StorefrontError::from_backend(e, LOAD_FAILED)
        })?;

        Ok(Self {
            profile,
            orders,
            ..Self::default()
        })
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.message()
    }

    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Order with its lines, fetched once per session.
    pub async fn order_detail(&mut self, sf: &Storefront, id: &OrderId) -> Result<&Order> {
        if self.details.get(id).is_none() {
            let token = sf.token_for(Role::Client)?;
            let order = sf
                .api()
                .order(token, id)
                .await
                .map_err(|e| StorefrontError::from_backend(e, "Unable to load the order."))?;
            self.details.insert(order);
        }
        self.details
            .get(id)
            .ok_or_else(|| StorefrontError::Validation(format!("Order not found: {}", id)))
    }

    /// Save profile edits.
    pub async fn update_profile(&mut self, sf: &Storefront, update: ClientProfile) -> Result<()> {
        let token = sf.token_for(Role::Client)?;
        let mut next = self.profile.clone();
        next.merge(update);
        next.validate()?;

        let echoed = sf
            .api()
            .update_client_profile(token, &next)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to update the profile."))?;
        self.profile = next;
        if let Some(echoed) = echoed {
            self.profile.merge(echoed);
        }
        tracing::info!("client profile updated");
        self.banner.show("Profile updated");
        Ok(())
    }

    /// Cancel an order.
    pub async fn cancel_order(&mut self, sf: &Storefront, id: &OrderId) -> Result<()> {
        let token = sf.token_for(Role::Client)?;
        let echoed = sf
            .api()
            .cancel_order(token, id)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to cancel the order."))?;

        match echoed {
            Some(update) => {
                if let Some(order) = self.orders.iter_mut().find(|o| &o.id == id) {
                    order.merge(update.clone());
                }
                if let Some(detail) = self.details.get_mut(id) {
                    detail.merge(update);
                }
            }
            None => {
                self.orders.retain(|o| &o.id != id);
                self.details.remove(id);
            }
        }
        tracing::info!(order = %id, "order cancelled");
        self.banner.show("Order cancelled");
        Ok(())
    }

    /// Delete the account, then log out.
    pub async fn delete_profile(self, sf: &mut Storefront) -> Result<()> {
        let token = sf.token_for(Role::Client)?;
        sf.api()
            .delete_client_profile(token)
            .await
            .map_err(|e| StorefrontError::from_backend(e, "Unable to delete the profile."))?;
        tracing::info!("client profile deleted");
        sf.session_mut().logout()?;
        Ok(())
    }
}
