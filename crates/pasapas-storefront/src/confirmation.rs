//! Order confirmation page.

use crate::error::{Result, StorefrontError};
use pasapas_auth::AuthSession;
use pasapas_commerce::account::ClientProfile;
use pasapas_commerce::checkout::{Order, OrderLine};
use pasapas_commerce::ids::OrderId;
use pasapas_data::StorefrontApi;

pub const ORDER_FAILED_MESSAGE: &str = "Unable to retrieve the order";
pub const CLIENT_FAILED_MESSAGE: &str = "Unable to retrieve the client record";

/// A placed order with the client it ships to.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order: Order,
    pub client: ClientProfile,
}

impl OrderConfirmation {
    /// Fetch the order and the client profile together. Both must succeed.
    pub async fn load(
        api: &dyn StorefrontApi,
        session: &AuthSession,
        order: &OrderId,
    ) -> Result<Self> {
        let (_, token) = session.require_user()?;
        let (order_result, client_result) =
            futures::join!(api.order(token, order), api.client_profile(token));

        let order = order_result.map_err(|e| {
            tracing::error!(%order, error = %e, "order fetch failed");
            StorefrontError::from_backend(e, ORDER_FAILED_MESSAGE)
        })?;
        let client = client_result.map_err(|e| {
            tracing::error!(error = %e, "client profile fetch failed");
            StorefrontError::from_backend(e, CLIENT_FAILED_MESSAGE)
        })?;
        Ok(Self { order, client })
    }

    /// Total formatted in euros.
    pub fn total(&self) -> String {
        self.order.total_label()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.order.lines
    }

    /// "First Last" of the recipient.
    pub fn recipient(&self) -> String {
        self.client.full_name()
    }
}
