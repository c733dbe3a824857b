//! The storefront context.
//!
//! [`Storefront`] is created once at startup and owns the state every view
//! shares: the API handle, the auth session and the cart. Views borrow it.

use crate::browser::CatalogBrowser;
use crate::cart::CartStore;
use crate::confirmation::OrderConfirmation;
use crate::error::{Result, StorefrontError};
use crate::payment::PaymentStep;
use crate::product::ProductDetail;
use pasapas_auth::{AuthError, AuthSession, Credentials, Registration, Role};
use pasapas_cache::Cache;
use pasapas_commerce::account::{ClientProfile, SellerProfile};
use pasapas_commerce::checkout::{OrderRef, PaymentOutcome};
use pasapas_commerce::ids::{OrderId, ProductId};
use pasapas_data::{FetchError, StorefrontApi};
use std::sync::Arc;

pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";
pub const PROFILE_FAILED_MESSAGE: &str = "Unable to save the profile.";

/// Where to send the user after an auth action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Login,
    ClientDashboard,
    SellerDashboard,
    AdminDashboard,
    ClientProfileForm,
    SellerProfileForm,
}

impl Landing {
    /// Dashboard for a freshly logged-in user.
    pub fn after_login(role: Role) -> Self {
        match role {
            Role::Client => Landing::ClientDashboard,
            Role::Seller => Landing::SellerDashboard,
            Role::Admin => Landing::AdminDashboard,
        }
    }

    /// Profile form for a freshly registered user.
    pub fn after_register(role: Role) -> Self {
        match role {
            Role::Seller => Landing::SellerProfileForm,
            _ => Landing::ClientProfileForm,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Landing::Login => "/login",
            Landing::ClientDashboard => "/client/dashboard",
            Landing::SellerDashboard => "/seller/dashboard",
            Landing::AdminDashboard => "/admin",
            Landing::ClientProfileForm => "/client/profile",
            Landing::SellerProfileForm => "/seller/profile",
        }
    }
}

/// Shared storefront state.
pub struct Storefront {
    api: Arc<dyn StorefrontApi>,
    session: AuthSession,
    cart: CartStore,
    payment_key: Option<String>,
}

impl Storefront {
    /// Restore the session and cart saved in `cache`.
    pub fn open(api: Arc<dyn StorefrontApi>, cache: Cache) -> Result<Self> {
        let session = AuthSession::restore(cache.clone())?;
        let cart = CartStore::open(cache)?;
        Ok(Self {
            api,
            session,
            cart,
            payment_key: None,
        })
    }

    /// Publishable key handed to the payment widget.
    pub fn with_payment_key(mut self, key: Option<String>) -> Self {
        self.payment_key = key;
        self
    }

    pub fn api(&self) -> &dyn StorefrontApi {
        self.api.as_ref()
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Bearer token of a user with `role`.
    pub(crate) fn token_for(&self, role: Role) -> Result<&str> {
        self.session.require_role(role)?;
        let (_, token) = self.session.require_user()?;
        Ok(token)
    }

    // Auth

    /// Create an account. When the backend hands back a token the user is
    /// logged in and sent to their profile form; otherwise to login.
    pub async fn register(&mut self, registration: &Registration) -> Result<Landing> {
        registration.validate()?;
        let reply = self.api.register(registration).await.map_err(|e| {
            tracing::error!(error = %e, "registration failed");
            StorefrontError::from_backend(e, REGISTER_FAILED_MESSAGE)
        })?;

        match reply.token {
            Some(token) => {
                self.session.login(&token)?;
                Ok(Landing::after_register(registration.role))
            }
            None => Ok(Landing::Login),
        }
    }

    /// Log in and pick the landing dashboard from the token's role.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Landing> {
        credentials.validate()?;
        let reply = self.api.login(credentials).await.map_err(|e| match e {
            FetchError::Rejected(_) => StorefrontError::Authentication(AuthError::InvalidCredentials),
            e if matches!(e.status(), Some(400 | 401 | 403 | 404)) => {
                StorefrontError::Authentication(AuthError::InvalidCredentials)
            }
            e => {
                tracing::error!(error = %e, "login failed");
                StorefrontError::from(e)
            }
        })?;

        let token = reply
            .token
            .ok_or(StorefrontError::Authentication(AuthError::InvalidCredentials))?;
        let user = self.session.login(&token)?;
        Ok(Landing::after_login(user.role))
    }

    pub fn logout(&mut self) -> Result<()> {
        Ok(self.session.logout()?)
    }

    /// Submit the client profile form.
    pub async fn create_client_profile(&self, profile: &ClientProfile) -> Result<ClientProfile> {
        profile.validate()?;
        let token = self.token_for(Role::Client)?;
        let saved = self
            .api
            .create_client_profile(token, profile)
            .await
            .map_err(|e| StorefrontError::from_backend(e, PROFILE_FAILED_MESSAGE))?;
        tracing::info!("client profile created");
        Ok(saved.unwrap_or_else(|| profile.clone()))
    }

    /// Submit the seller profile form.
    pub async fn create_seller_profile(&self, profile: &SellerProfile) -> Result<SellerProfile> {
        profile.validate()?;
        let token = self.token_for(Role::Seller)?;
        let saved = self
            .api
            .create_seller_profile(token, profile)
            .await
            .map_err(|e| StorefrontError::from_backend(e, PROFILE_FAILED_MESSAGE))?;
        tracing::info!("seller profile created");
        Ok(saved.unwrap_or_else(|| profile.clone()))
    }

    // Shopping

    pub async fn browse(&self) -> Result<CatalogBrowser> {
        CatalogBrowser::load(self.api()).await
    }

    pub async fn product(&self, id: &ProductId) -> Result<ProductDetail> {
        ProductDetail::load(self.api(), id).await
    }

    pub fn add_to_cart(&mut self, detail: &ProductDetail, quantity: i64) -> Result<()> {
        detail.add_to_cart(&self.session, &mut self.cart, quantity)
    }

    /// Turn the cart into an order.
    pub async fn checkout(&mut self) -> Result<OrderRef> {
        self.cart.checkout(self.api.as_ref(), &self.session).await
    }

    /// Start a payment step, if a publishable key is configured.
    pub fn payment(&self) -> Result<PaymentStep> {
        PaymentStep::new(self.payment_key.as_deref())
    }

    pub async fn prepare_payment(&self, step: &mut PaymentStep, order: &OrderId) -> Result<bool> {
        step.prepare(self.api(), &self.session, order).await
    }

    pub fn finish_payment(
        &mut self,
        step: &PaymentStep,
        outcome: PaymentOutcome,
    ) -> Result<PaymentOutcome> {
        step.finish(outcome, &mut self.cart)
    }

    pub async fn confirmation(&self, order: &OrderId) -> Result<OrderConfirmation> {
        OrderConfirmation::load(self.api(), &self.session, order).await
    }

    pub(crate) fn session_mut(&mut self) -> &mut AuthSession {
        &mut self.session
    }
}
