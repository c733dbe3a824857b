//! Storefront endpoints.

use crate::{FetchClient, FetchError, RequestBuilder, Response};
use async_trait::async_trait;
use pasapas_auth::{Credentials, Registration};
use pasapas_commerce::account::{ClientProfile, SellerProfile};
use pasapas_commerce::catalog::{normalize, NewProduct, NewStock, Product, Stock};
use pasapas_commerce::checkout::{
    LineStatusUpdate, Order, OrderLine, OrderRef, OrderRequest, OrderStatusUpdate, PaymentIntent,
};
use pasapas_commerce::ids::{OrderId, OrderLineId, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API.
    pub base_url: String,
    /// Path of the public product catalog, relative to `base_url`.
    pub products_path: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            products_path: "/api/v1/products".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Answer to a login or registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthReply {
    /// Bearer token, when the backend issued one.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthReply {
    /// Read the token from the top level or from a `data` wrapper.
    pub fn from_body(body: Value) -> Result<Self, FetchError> {
        let mut reply = AuthReply {
            token: None,
            message: crate::message_of(&body),
        };
        reply.token = body
            .get("token")
            .or_else(|| body.get("data").and_then(|d| d.get("token")))
            .and_then(Value::as_str)
            .map(str::to_string);
        // Surface `success: false` as an error.
        crate::payload(body)?;
        Ok(reply)
    }
}

/// Every backend call the storefront makes.
///
/// Calls that need a session take the bearer `token` explicitly. Mutations
/// return the entity the backend echoed back, or `None` when it sent none.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    // Auth
    async fn register(&self, registration: &Registration) -> Result<AuthReply, FetchError>;
    async fn login(&self, credentials: &Credentials) -> Result<AuthReply, FetchError>;

    // Catalog
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;
    async fn product(&self, id: &ProductId) -> Result<Product, FetchError>;
    async fn product_stocks(&self, id: &ProductId) -> Result<Vec<Stock>, FetchError>;

    // Client account
    async fn create_client_profile(
        &self,
        token: &str,
        profile: &ClientProfile,
    ) -> Result<Option<ClientProfile>, FetchError>;
    async fn client_profile(&self, token: &str) -> Result<ClientProfile, FetchError>;
    async fn update_client_profile(
        &self,
        token: &str,
        profile: &ClientProfile,
    ) -> Result<Option<ClientProfile>, FetchError>;
    async fn delete_client_profile(&self, token: &str) -> Result<(), FetchError>;

    // Client orders
    async fn create_order(&self, token: &str, order: &OrderRequest)
        -> Result<OrderRef, FetchError>;
    async fn client_orders(&self, token: &str) -> Result<Vec<Order>, FetchError>;
    async fn order(&self, token: &str, id: &OrderId) -> Result<Order, FetchError>;
    async fn cancel_order(&self, token: &str, id: &OrderId) -> Result<Option<Order>, FetchError>;

    // Seller account
    async fn create_seller_profile(
        &self,
        token: &str,
        profile: &SellerProfile,
    ) -> Result<Option<SellerProfile>, FetchError>;
    async fn seller_profile(&self, token: &str) -> Result<SellerProfile, FetchError>;
    async fn update_seller_profile(
        &self,
        token: &str,
        profile: &SellerProfile,
    ) -> Result<Option<SellerProfile>, FetchError>;
    async fn delete_seller_profile(&self, token: &str) -> Result<(), FetchError>;

    // Seller listings and orders
    async fn seller_products(&self, token: &str) -> Result<Vec<Product>, FetchError>;
    async fn create_product(&self, token: &str, product: &NewProduct)
        -> Result<Product, FetchError>;
    async fn create_stock(
        &self,
        token: &str,
        product: &ProductId,
        stock: &NewStock,
    ) -> Result<Option<Stock>, FetchError>;
    async fn delete_product(&self, token: &str, id: &ProductId) -> Result<(), FetchError>;
    async fn seller_orders(&self, token: &str) -> Result<Vec<Order>, FetchError>;
    async fn seller_order(&self, token: &str, id: &OrderId) -> Result<Order, FetchError>;
    async fn update_order_status(
        &self,
        token: &str,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<Option<Order>, FetchError>;
    async fn update_line_status(
        &self,
        token: &str,
        order: &OrderId,
        line: &OrderLineId,
        update: &LineStatusUpdate,
    ) -> Result<Option<OrderLine>, FetchError>;

    // Payment
    async fn create_payment_intent(
        &self,
        token: &str,
        order: &OrderId,
    ) -> Result<PaymentIntent, FetchError>;
}

/// [`StorefrontApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    client: FetchClient,
    products_path: String,
}

impl HttpStorefrontApi {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = FetchClient::new(config.base_url, config.timeout)?
            .with_default_header("Accept", "application/json");
        Ok(Self {
            client,
            products_path: config.products_path,
        })
    }

    fn product_path(&self, id: &ProductId) -> String {
        format!("{}/{}", self.products_path.trim_end_matches('/'), id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = request.method();
        let path = request.path().to_string();
        self.client.send(request).await.map_err(|e| {
            tracing::error!(method = method.as_str(), %path, error = %e, "backend call failed");
            e
        })
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    #[instrument(skip(self, registration), fields(email = %registration.credentials.email, role = %registration.role))]
    async fn register(&self, registration: &Registration) -> Result<AuthReply, FetchError> {
        let resp = self
            .send(self.client.post("/auth/register").json(registration)?)
            .await?;
        AuthReply::from_body(resp.json_value()?)
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthReply, FetchError> {
        let resp = self
            .send(self.client.post("/auth/login").json(credentials)?)
            .await?;
        AuthReply::from_body(resp.json_value()?)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let resp = self.send(self.client.get(self.products_path.as_str())).await?;
        Ok(normalize::product_list(resp.json_value()?))
    }

    #[instrument(skip(self))]
    async fn product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let resp = self.send(self.client.get(self.product_path(id))).await?;
        normalize::single_product(resp.json_value()?).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn product_stocks(&self, id: &ProductId) -> Result<Vec<Stock>, FetchError> {
        let resp = self.send(self.client.get(self.product_path(id))).await?;
        normalize::stock_list(resp.json_value()?).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    #[instrument(skip_all)]
    async fn create_client_profile(
        &self,
        token: &str,
        profile: &ClientProfile,
    ) -> Result<Option<ClientProfile>, FetchError> {
        let req = self.client.post("/clients/profile").bearer_auth(token).json(profile)?;
        self.send(req).await?.optional_data()
    }

    #[instrument(skip_all)]
    async fn client_profile(&self, token: &str) -> Result<ClientProfile, FetchError> {
        let req = self.client.get("/clients/profile").bearer_auth(token);
        self.send(req).await?.data()
    }

    #[instrument(skip_all)]
    async fn update_client_profile(
        &self,
        token: &str,
        profile: &ClientProfile,
    ) -> Result<Option<ClientProfile>, FetchError> {
        let req = self.client.put("/clients/profile").bearer_auth(token).json(profile)?;
        self.send(req).await?.optional_data()
    }

    #[instrument(skip_all)]
    async fn delete_client_profile(&self, token: &str) -> Result<(), FetchError> {
        let req = self.client.delete("/clients/profile").bearer_auth(token);
        self.send(req).await?.optional_data::<Value>()?;
        Ok(())
    }

    #[instrument(skip(self, token, order), fields(client = %order.client_id, lines = order.items.len()))]
    async fn create_order(
        &self,
        token: &str,
        order: &OrderRequest,
    ) -> Result<OrderRef, FetchError> {
        let req = self.client.post("/orders").bearer_auth(token).json(order)?;
        self.send(req).await?.data()
    }

    #[instrument(skip_all)]
    async fn client_orders(&self, token: &str) -> Result<Vec<Order>, FetchError> {
        let req = self.client.get("/orders").bearer_auth(token);
        self.send(req).await?.list()
    }

    #[instrument(skip(self, token))]
    async fn order(&self, token: &str, id: &OrderId) -> Result<Order, FetchError> {
        let req = self.client.get(format!("/orders/{}", id)).bearer_auth(token);
        self.send(req).await?.data()
    }

    #[instrument(skip(self, token))]
    async fn cancel_order(&self, token: &str, id: &OrderId) -> Result<Option<Order>, FetchError> {
        let req = self.client.delete(format!("/orders/{}", id)).bearer_auth(token);
        self.send(req).await?.optional_data()
    }

    #[instrument(skip_all)]
    async fn create_seller_profile(
        &self,
        token: &str,
        profile: &SellerProfile,
    ) -> Result<Option<SellerProfile>, FetchError> {
        let req = self.client.post("/sellers/profile").bearer_auth(token).json(profile)?;
        self.send(req).await?.optional_data()
    }

    #[instrument(skip_all)]
    async fn seller_profile(&self, token: &str) -> Result<SellerProfile, FetchError> {
        let req = self.client.get("/sellers/profile").bearer_auth(token);
        self.send(req).await?.data()
    }

    #[instrument(skip_all)]
    async fn update_seller_profile(
        &self,
        token: &str,
        profile: &SellerProfile,
    ) -> Result<Option<SellerProfile>, FetchError> {
        let req = self.client.put("/sellers/profile").bearer_auth(token).json(profile)?;
        self.send(req).await?.optional_data()
    }

    #[instrument(skip_all)]
    async fn delete_seller_profile(&self, token: &str) -> Result<(), FetchError> {
        let req = self.client.delete("/sellers/profile").bearer_auth(token);
        self.send(req).await?.optional_data::<Value>()?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn seller_products(&self, token: &str) -> Result<Vec<Product>, FetchError> {
        let req = self.client.get("/sellers/products").bearer_auth(token);
        Ok(normalize::product_list(self.send(req).await?.json_value()?))
    }

    #[instrument(skip(self, token, product), fields(brand = %product.brand, model = %product.model))]
    async fn create_product(
        &self,
        token: &str,
        product: &NewProduct,
    ) -> Result<Product, FetchError> {
        let req = self.client.post("/products").bearer_auth(token).json(product)?;
        self.send(req).await?.data()
    }

    #[instrument(skip(self, token, stock))]
    async fn create_stock(
        &self,
        token: &str,
        product: &ProductId,
        stock: &NewStock,
    ) -> Result<Option<Stock>, FetchError> {
        let req = self
            .client
            .post(format!("/products/{}/stocks", product))
            .bearer_auth(token)
            .json(stock)?;
        self.send(req).await?.optional_data()
    }

    #[instrument(skip(self, token))]
    async fn delete_product(&self, token: &str, id: &ProductId) -> Result<(), FetchError> {
        let req = self.client.delete(format!("/products/{}", id)).bearer_auth(token);
        self.send(req).await?.optional_data::<Value>()?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn seller_orders(&self, token: &str) -> Result<Vec<Order>, FetchError> {
        let req = self.client.get("/sellers/orders").bearer_auth(token);
        self.send(req).await?.list()
    }

    #[instrument(skip(self, token))]
    async fn seller_order(&self, token: &str, id: &OrderId) -> Result<Order, FetchError> {
        let req = self.client.get(format!("/sellers/orders/{}", id)).bearer_auth(token);
        self.send(req).await?.data()
    }

    #[instrument(skip(self, token))]
    async fn update_order_status(
        &self,
        token: &str,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<Option<Order>, FetchError> {
        let req = self
            .client
            .patch(format!("/sellers/orders/{}/status", id))
            .bearer_auth(token)
            .json(update)?;
        self.send(req).await?.optional_data()
    }

    #[instrument(skip(self, token))]
    async fn update_line_status(
        &self,
        token: &str,
        order: &OrderId,
        line: &OrderLineId,
        update: &LineStatusUpdate,
    ) -> Result<Option<OrderLine>, FetchError> {
        let req = self
            .client
            .patch(format!("/sellers/orders/{}/lines/{}/status", order, line))
            .bearer_auth(token)
            .json(update)?;
        self.send(req).await?.optional_data()
    }

    #[instrument(skip(self, token))]
    async fn create_payment_intent(
        &self,
        token: &str,
        order: &OrderId,
    ) -> Result<PaymentIntent, FetchError> {
        let req = self
            .client
            .post(format!("/payments/{}", order))
            .bearer_auth(token)
            .empty_json();
        Ok(self.send(req).await?.optional_data()?.unwrap_or_default())
    }
}
