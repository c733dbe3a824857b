//! Product detail page.

use crate::cart::CartStore;
use crate::error::{Result, StorefrontError};
use pasapas_auth::{AuthError, AuthSession};
use pasapas_commerce::catalog::{Product, Stock};
use pasapas_commerce::ids::{ProductId, VariantId};
use pasapas_commerce::CommerceError;
use pasapas_data::StorefrontApi;

pub const LOAD_FAILED_MESSAGE: &str = "Unable to load this product.";

/// One product with the shopper's image and variant choice.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    product: Product,
    image: Option<String>,
    variant: Option<VariantId>,
}

impl ProductDetail {
    pub fn new(product: Product) -> Self {
        let image = product.image_1.clone();
        Self {
            product,
            image,
            variant: None,
        }
    }

    pub async fn load(api: &dyn StorefrontApi, id: &ProductId) -> Result<Self> {
        let product = api.product(id).await.map_err(|e| {
            tracing::error!(product = %id, error = %e, "product fetch failed");
            StorefrontError::remote(LOAD_FAILED_MESSAGE, e)
        })?;
        Ok(Self::new(product))
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Where to send the shopper back to after logging in.
    pub fn return_path(&self) -> String {
        format!("/products/{}", self.product.id)
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Show one of the product's images. Unknown URLs are ignored.
    pub fn select_image(&mut self, url: &str) -> bool {
        if self.product.images().contains(&url) {
            self.image = Some(url.to_string());
            true
        } else {
            false
        }
    }

    /// Variants offered in the size picker.
    pub fn choices(&self) -> impl Iterator<Item = &Stock> {
        self.product.available_stocks()
    }

    pub fn selected(&self) -> Option<&Stock> {
        self.variant.as_ref().and_then(|id| self.product.stock(id))
    }

    /// Pick a variant. Only available ones can be picked.
    pub fn select_variant(&mut self, id: &VariantId) -> Result<&Stock> {
        let available = self
            .product
            .stock(id)
            .ok_or_else(|| CommerceError::VariantNotFound(id.to_string()))?
            .availability
            .is_available();
        if !available {
            return Err(CommerceError::VariantUnavailable(id.to_string()).into());
        }
        self.variant = Some(id.clone());
        self.product
            .stock(id)
            .ok_or_else(|| CommerceError::VariantNotFound(id.to_string()).into())
    }

    /// Put the selected variant in the cart.
    ///
    /// Requires a logged-in shopper; the caller should send them to login
    /// and back to [`ProductDetail::return_path`].
    pub fn add_to_cart(
        &self,
        session: &AuthSession,
        cart: &mut CartStore,
        quantity: i64,
    ) -> Result<()> {
        if !session.is_authenticated() {
            return Err(AuthError::NotAuthenticated.into());
        }
        let stock = self
            .selected()
            .ok_or_else(|| StorefrontError::Validation("Please choose a size.".to_string()))?;
        cart.add(&self.product, stock, quantity)?;
        tracing::info!(product = %self.product.id, variant = %stock.id, quantity, "added to cart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasapas_auth::{encode_unsigned, Claims, Role};
    use pasapas_cache::Cache;
    use pasapas_commerce::catalog::Availability;
    use pasapas_commerce::ids::UserId;

    fn detail() -> ProductDetail {
        let mut p = Product::new("5");
        p.image_1 = Some("https://cdn/1.jpg".into());
        p.image_2 = Some("https://cdn/2.jpg".into());
        let mut open = Stock::new("50");
        open.size = Some("42".into());
        let mut sold_out = Stock::new("51");
        sold_out.availability = Availability::Unavailable("Rupture".into());
        p.stocks = vec![open, sold_out];
        ProductDetail::new(p)
    }

    fn logged_in(cache: Cache) -> AuthSession {
        let mut session = AuthSession::restore(cache).unwrap();
        let token = encode_unsigned(&Claims {
            id: UserId::new("3"),
            role: Role::Client,
            exp: None,
        });
        session.login(&token).unwrap();
        session
    }

    #[test]
    fn test_images() {
        let mut d = detail();
        assert_eq!(d.image(), Some("https://cdn/1.jpg"));
        assert!(d.select_image("https://cdn/2.jpg"));
        assert!(!d.select_image("https://elsewhere/x.jpg"));
        assert_eq!(d.image(), Some("https://cdn/2.jpg"));
    }

    #[test]
    fn test_only_available_variants() {
        let mut d = detail();
        assert_eq!(d.choices().count(), 1);
        assert!(d.select_variant(&VariantId::new("51")).is_err());
        assert!(d.select_variant(&VariantId::new("99")).is_err());
        assert_eq!(d.select_variant(&VariantId::new("50")).unwrap().label(), "42");
    }

    #[test]
    fn test_add_requires_login() {
        let cache = Cache::memory();
        let session = AuthSession::restore(cache.clone()).unwrap();
        let mut cart = CartStore::open(cache).unwrap();
        let mut d = detail();
        d.select_variant(&VariantId::new("50")).unwrap();
        let err = d.add_to_cart(&session, &mut cart, 1).unwrap_err();
        assert!(err.requires_login());
        assert_eq!(d.return_path(), "/products/5");
    }

    #[test]
    fn test_add_requires_size() {
        let cache = Cache::memory();
        let session = logged_in(cache.clone());
        let mut cart = CartStore::open(cache).unwrap();
        let d = detail();
        assert!(matches!(
            d.add_to_cart(&session, &mut cart, 1),
            Err(StorefrontError::Validation(_))
        ));
    }

    #[test]
    fn test_add_selected_variant() {
        let cache = Cache::memory();
        let session = logged_in(cache.clone());
        let mut cart = CartStore::open(cache).unwrap();
        let mut d = detail();
        d.select_variant(&VariantId::new("50")).unwrap();
        d.add_to_cart(&session, &mut cart, 2).unwrap();
        assert_eq!(cart.cart().item_count(), 2);
    }
}
