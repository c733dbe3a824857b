//! In-memory backend for controller tests.

#![allow(dead_code)]

use async_trait::async_trait;
use pasapas_auth::{encode_unsigned, Claims, Credentials, Registration, Role};
use pasapas_cache::Cache;
use pasapas_commerce::account::{ClientProfile, SellerProfile};
use pasapas_commerce::catalog::{NewProduct, NewStock, Product, Stock};
use pasapas_commerce::checkout::{
    LineStatusUpdate, Order, OrderLine, OrderRef, OrderRequest, OrderStatusUpdate, PaymentIntent,
};
use pasapas_commerce::ids::{OrderId, OrderLineId, ProductId, UserId};
use pasapas_data::{AuthReply, FetchError, StorefrontApi};
use pasapas_storefront::Storefront;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn token(id: &str, role: Role) -> String {
    encode_unsigned(&Claims {
        id: UserId::new(id),
        role,
        exp: None,
    })
}

pub fn product(id: &str, brand: &str, model: &str) -> Product {
    let mut p = Product::new(id);
    p.brand = Some(brand.into());
    p.model = Some(model.into());
    p
}

pub fn stock(id: &str, size: &str, price: &str) -> Stock {
    let mut s = Stock::new(id);
    s.size = Some(size.into());
    s.gender = Some("Homme".into());
    s.price = Some(price.into());
    s
}

pub fn not_found() -> FetchError {
    FetchError::HttpError {
        status: 404,
        message: "Not found".into(),
    }
}

/// Records every call and answers from its fields.
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub fail_list: bool,
    pub products: Vec<Product>,
    pub stocks: HashMap<ProductId, Vec<Stock>>,
    pub login_token: Option<String>,
    pub register_token: Option<String>,
    pub client_profile: Option<ClientProfile>,
    pub seller_profile: Option<SellerProfile>,
    pub orders: Vec<Order>,
    pub echo_mutations: bool,
    pub payment_secret: Option<String>,
    pub fail_stock_creation: bool,
    pub last_order: Mutex<Option<OrderRequest>>,
}

impl FakeApi {
    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn find_order(&self, id: &OrderId) -> Result<Order, FetchError> {
        self.orders
            .iter()
            .find(|o| &o.id == id)
            .cloned()
            .ok_or_else(not_found)
    }
}

/// A storefront over `api`, logged in as `role` when given.
pub fn storefront(api: Arc<FakeApi>, role: Option<Role>) -> Storefront {
    let cache = Cache::memory();
    if let Some(role) = role {
        let mut session = pasapas_auth::AuthSession::restore(cache.clone()).unwrap();
        session.login(&token("42", role)).unwrap();
    }
    Storefront::open(api, cache)
        .unwrap()
        .with_payment_key(Some("pk_test".into()))
}

#[async_trait]
impl StorefrontApi for FakeApi {
    async fn register(&self, registration: &Registration) -> Result<AuthReply, FetchError> {
        self.record(format!("register {}", registration.credentials.email));
        if registration.credentials.email == "taken@pasapas.shop" {
            return Err(FetchError::HttpError {
                status: 409,
                message: "Email already used".into(),
            });
        }
        Ok(AuthReply {
            token: self.register_token.clone(),
            message: None,
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthReply, FetchError> {
        self.record(format!("login {}", credentials.email));
        match &self.login_token {
            Some(token) => Ok(AuthReply {
                token: Some(token.clone()),
                message: None,
            }),
            None => Err(FetchError::HttpError {
                status: 401,
                message: "Invalid credentials".into(),
            }),
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.record("list_products");
        if self.fail_list {
            return Err(FetchError::RequestError("connection refused".into()));
        }
        Ok(self.products.clone())
    }

    async fn product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.record(format!("product {}", id));
        let mut product = self
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(not_found)?;
        product.stocks = self.stocks.get(id).cloned().unwrap_or_default();
        Ok(product)
    }

    async fn product_stocks(&self, id: &ProductId) -> Result<Vec<Stock>, FetchError> {
        self.record(format!("stocks {}", id));
        self.stocks.get(id).cloned().ok_or_else(not_found)
    }

    async fn create_client_profile(
        &self,
        _token: &str,
        profile: &ClientProfile,
    ) -> Result<Option<ClientProfile>, FetchError> {
        self.record("create_client_profile");
        Ok(self.echo_mutations.then(|| profile.clone()))
    }

    async fn client_profile(&self, _token: &str) -> Result<ClientProfile, FetchError> {
        self.record("client_profile");
        self.client_profile
            .clone()
            .ok_or_else(|| FetchError::Rejected("Client not found".into()))
    }

    async fn update_client_profile(
        &self,
        _token: &str,
        profile: &ClientProfile,
    ) -> Result<Option<ClientProfile>, FetchError> {
        self.record("update_client_profile");
        Ok(self.echo_mutations.then(|| profile.clone()))
    }

    async fn delete_client_profile(&self, _token: &str) -> Result<(), FetchError> {
        self.record("delete_client_profile");
        Ok(())
    }

    async fn create_order(
        &self,
        _token: &str,
        order: &OrderRequest,
    ) -> Result<OrderRef, FetchError> {
        self.record("create_order");
        *self.last_order.lock().unwrap() = Some(order.clone());
        Ok(OrderRef {
            id: OrderId::new("900"),
        })
    }

    async fn client_orders(&self, _token: &str) -> Result<Vec<Order>, FetchError> {
        self.record("client_orders");
        Ok(self.orders.clone())
    }

    async fn order(&self, _token: &str, id: &OrderId) -> Result<Order, FetchError> {
        self.record(format!("order {}", id));
        self.find_order(id)
    }

    async fn cancel_order(&self, _token: &str, id: &OrderId) -> Result<Option<Order>, FetchError> {
        self.record(format!("cancel_order {}", id));
        let mut order = self.find_order(id)?;
        order.status = Some("annulee".into());
        Ok(self.echo_mutations.then_some(order))
    }

    async fn create_seller_profile(
        &self,
        _token: &str,
        profile: &SellerProfile,
    ) -> Result<Option<SellerProfile>, FetchError> {
        self.record("create_seller_profile");
        Ok(self.echo_mutations.then(|| profile.clone()))
    }

    async fn seller_profile(&self, _token: &str) -> Result<SellerProfile, FetchError> {
        self.record("seller_profile");
        self.seller_profile.clone().ok_or_else(not_found)
    }

    async fn update_seller_profile(
        &self,
        _token: &str,
        profile: &SellerProfile,
    ) -> Result<Option<SellerProfile>, FetchError> {
        self.record("update_seller_profile");
        Ok(self.echo_mutations.then(|| profile.clone()))
    }

    async fn delete_seller_profile(&self, _token: &str) -> Result<(), FetchError> {
        self.record("delete_seller_profile");
        Ok(())
    }

    async fn seller_products(&self, _token: &str) -> Result<Vec<Product>, FetchError> {
        self.record("seller_products");
        Ok(self.products.clone())
    }

    async fn create_product(
        &self,
        _token: &str,
        product: &NewProduct,
    ) -> Result<Product, FetchError> {
        self.record("create_product");
        Ok(self::product("77", &product.brand, &product.model))
    }

    async fn create_stock(
        &self,
        _token: &str,
        product: &ProductId,
        stock: &NewStock,
    ) -> Result<Option<Stock>, FetchError> {
        self.record(format!("create_stock {}", product));
        if self.fail_stock_creation {
            return Err(FetchError::Rejected("Invalid size".into()));
        }
        let created = self::stock(&format!("{}-{}", product, stock.size), &stock.size, &stock.price);
        Ok(Some(created))
    }

    async fn delete_product(&self, _token: &str, id: &ProductId) -> Result<(), FetchError> {
        self.record(format!("delete_product {}", id));
        Ok(())
    }

    async fn seller_orders(&self, _token: &str) -> Result<Vec<Order>, FetchError> {
        self.record("seller_orders");
        Ok(self.orders.clone())
    }

    async fn seller_order(&self, _token: &str, id: &OrderId) -> Result<Order, FetchError> {
        self.record(format!("seller_order {}", id));
        self.find_order(id)
    }

    async fn update_order_status(
        &self,
        _token: &str,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<Option<Order>, FetchError> {
        self.record(format!("order_status {} {}", id, update.status));
        Ok(None)
    }

    async fn update_line_status(
        &self,
        _token: &str,
        order: &OrderId,
        line: &OrderLineId,
        update: &LineStatusUpdate,
    ) -> Result<Option<OrderLine>, FetchError> {
        self.record(format!("line_status {} {} {}", order, line, update.status));
        Ok(None)
    }

    async fn create_payment_intent(
        &self,
        _token: &str,
        order: &OrderId,
    ) -> Result<PaymentIntent, FetchError> {
        self.record(format!("payment {}", order));
        Ok(PaymentIntent {
            client_secret: self.payment_secret.clone(),
        })
    }
}
