//! Payment step.
//!
//! Asks the backend for a client secret, hands it to the hosted card widget,
//! and reacts to what the widget reports.

use crate::cart::CartStore;
use crate::error::{Result, StorefrontError};
use pasapas_auth::AuthSession;
use pasapas_commerce::checkout::PaymentOutcome;
use pasapas_commerce::ids::OrderId;
use pasapas_data::StorefrontApi;

pub const MISSING_KEY_MESSAGE: &str = "The payment publishable key is missing.";
pub const MISSING_ORDER_MESSAGE: &str = "Order not found";
pub const NO_SECRET_MESSAGE: &str = "Unable to retrieve the payment.";
pub const PREPARE_FAILED_MESSAGE: &str = "Unable to prepare the payment.";

/// Payment for one order at a time.
#[derive(Debug, Clone)]
pub struct PaymentStep {
    publishable_key: String,
    order: Option<OrderId>,
    client_secret: Option<String>,
}

impl PaymentStep {
    /// Refuses to start without a publishable key.
    pub fn new(publishable_key: Option<&str>) -> Result<Self> {
        let publishable_key = publishable_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StorefrontError::Payment(MISSING_KEY_MESSAGE.to_string()))?;
        Ok(Self {
            publishable_key: publishable_key.to_string(),
            order: None,
            client_secret: None,
        })
    }

    pub fn publishable_key(&self) -> &str {
        &self.publishable_key
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// Request a payment intent for `order`.
    ///
    /// Only the first call for a given order reaches the backend; later
    /// calls for the same order return `Ok(false)` and change nothing.
    pub async fn prepare(
        &mut self,
        api: &dyn StorefrontApi,
        session: &AuthSession,
        order: &OrderId,
    ) -> Result<bool> {
        if order.is_empty() {
            return Err(StorefrontError::Payment(MISSING_ORDER_MESSAGE.to_string()));
        }
        if self.order.as_ref() == Some(order) {
            return Ok(false);
        }
        let (_, token) = session.require_user()?;
        self.order = Some(order.clone());
        self.client_secret = None;

        let intent = api.create_payment_intent(token, order).await.map_err(|e| {
            tracing::error!(%order, error = %e, "payment intent request failed");
            StorefrontError::Payment(
                e.backend_message()
                    .unwrap_or(PREPARE_FAILED_MESSAGE)
                    .to_string(),
            )
        })?;
        let secret = intent
            .secret()
            .ok_or_else(|| StorefrontError::Payment(NO_SECRET_MESSAGE.to_string()))?;

        tracing::debug!(%order, "payment intent ready");
        self.client_secret = Some(secret.to_string());
        Ok(true)
    }

    /// Apply the widget's outcome. A successful payment empties the cart.
    pub fn finish(&self, outcome: PaymentOutcome, cart: &mut CartStore) -> Result<PaymentOutcome> {
        match &outcome {
            PaymentOutcome::Succeeded => {
                cart.clear()?;
                tracing::info!(order = ?self.order, "payment succeeded");
            }
            PaymentOutcome::Processing => {
                tracing::info!(order = ?self.order, "payment processing");
            }
            PaymentOutcome::Failed(message) => {
                tracing::warn!(order = ?self.order, %message, "payment failed");
            }
        }
        Ok(outcome)
    }
}
