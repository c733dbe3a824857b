//! Product and stock variant types.

use crate::ids::{ProductId, VariantId};
use crate::money::parse_price;
use crate::wire::opt_string;
use serde::{Deserialize, Serialize};

/// Wire label the backend uses for a variant that can be bought.
pub const AVAILABLE_LABEL: &str = "Disponible";

/// Availability status of a stock variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Availability {
    /// The variant can be added to the cart.
    Available,
    /// Anything else the backend reports ("Rupture", "Indisponible", ...).
    Unavailable(String),
}

impl Availability {
    /// Check if the variant can be purchased.
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    /// Get the label as sent by the backend.
    pub fn label(&self) -> &str {
        match self {
            Availability::Available => AVAILABLE_LABEL,
            Availability::Unavailable(label) => label,
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Availability::Unavailable(String::new())
    }
}

impl From<Option<String>> for Availability {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(label) if label.trim() == AVAILABLE_LABEL => Availability::Available,
            Some(label) => Availability::Unavailable(label),
            None => Availability::default(),
        }
    }
}

impl From<Availability> for String {
    fn from(value: Availability) -> Self {
        value.label().to_string()
    }
}

/// A sneaker in the catalog.
///
/// Descriptive attributes sit on the product; purchasable combinations of
/// size, gender and price sit on its [`Stock`] variants. Some legacy listings
/// also carry a product-level color, gender, size or price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Parent product identifier.
    #[serde(rename = "parent_id")]
    pub id: ProductId,
    /// Brand name.
    #[serde(default, deserialize_with = "opt_string")]
    pub brand: Option<String>,
    /// Model name.
    #[serde(default, deserialize_with = "opt_string")]
    pub model: Option<String>,
    /// Main colorway.
    #[serde(default, deserialize_with = "opt_string")]
    pub color: Option<String>,
    /// Product-level gender, when the listing has a single one.
    #[serde(default, deserialize_with = "opt_string")]
    pub gender: Option<String>,
    /// Product-level size, when the listing has a single one.
    #[serde(default, deserialize_with = "opt_string")]
    pub size: Option<String>,
    /// Product-level price as a display string.
    #[serde(default, deserialize_with = "opt_string")]
    pub price: Option<String>,
    /// Long description.
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    /// Release date as sent by the backend.
    #[serde(default, deserialize_with = "opt_string")]
    pub release_date: Option<String>,
    /// Primary image URL.
    #[serde(rename = "img_1", default, deserialize_with = "opt_string")]
    pub image_1: Option<String>,
    /// Secondary image URL.
    #[serde(rename = "img_2", default, deserialize_with = "opt_string")]
    pub image_2: Option<String>,
    /// Tertiary image URL.
    #[serde(rename = "img_3", default, deserialize_with = "opt_string")]
    pub image_3: Option<String>,
    /// Purchasable variants.
    #[serde(default)]
    pub stocks: Vec<Stock>,
}

impl Product {
    /// Create a bare product with only an identifier.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            brand: None,
            model: None,
            color: None,
            gender: None,
            size: None,
            price: None,
            description: None,
            release_date: None,
            image_1: None,
            image_2: None,
            image_3: None,
            stocks: Vec::new(),
        }
    }

    /// "Brand - Model" label used in listings and the cart.
    pub fn display_name(&self) -> String {
        match (self.brand.as_deref(), self.model.as_deref()) {
            (Some(brand), Some(model)) => format!("{} - {}", brand.trim(), model.trim()),
            (Some(only), None) | (None, Some(only)) => only.trim().to_string(),
            (None, None) => self.id.to_string(),
        }
    }

    /// Image URLs in display order, skipping empty slots.
    pub fn images(&self) -> Vec<&str> {
        [&self.image_1, &self.image_2, &self.image_3]
            .into_iter()
            .filter_map(|img| img.as_deref())
            .collect()
    }

    /// Trimmed brand.
    pub fn brand_name(&self) -> Option<&str> {
        self.brand.as_deref().map(str::trim)
    }

    /// Product-level and variant-level colors, trimmed.
    pub fn colors(&self) -> Vec<&str> {
        trimmed(
            std::iter::once(self.color.as_deref())
                .chain(self.stocks.iter().map(|s| s.color.as_deref())),
        )
    }

    /// Product-level and variant-level sizes, trimmed.
    pub fn sizes(&self) -> Vec<&str> {
        trimmed(
            std::iter::once(self.size.as_deref())
                .chain(self.stocks.iter().map(|s| s.size.as_deref())),
        )
    }

    /// Product-level and variant-level genders, trimmed.
    pub fn genders(&self) -> Vec<&str> {
        trimmed(
            std::iter::once(self.gender.as_deref())
                .chain(self.stocks.iter().map(|s| s.gender.as_deref())),
        )
    }

    /// Every parseable price on the product and its variants.
    ///
    /// Unparseable strings are skipped individually.
    pub fn price_candidates(&self) -> Vec<f64> {
        std::iter::once(self.price.as_deref())
            .chain(self.stocks.iter().map(|s| s.price.as_deref()))
            .flatten()
            .filter_map(parse_price)
            .collect()
    }

    /// Case-insensitive color match against the product or any variant.
    pub fn has_color(&self, color: &str) -> bool {
        let target = color.trim().to_lowercase();
        self.colors().iter().any(|c| c.to_lowercase() == target)
    }

    /// Exact (trimmed) size match against the product or any variant.
    pub fn has_size(&self, size: &str) -> bool {
        let target = size.trim();
        self.sizes().iter().any(|s| *s == target)
    }

    /// Case-insensitive gender match against the product or any variant.
    pub fn has_gender(&self, gender: &str) -> bool {
        let target = gender.trim().to_lowercase();
        self.genders().iter().any(|g| g.to_lowercase() == target)
    }

    /// Find a variant by id.
    pub fn stock(&self, variant_id: &VariantId) -> Option<&Stock> {
        self.stocks.iter().find(|s| &s.id == variant_id)
    }

    /// Variants that can currently be bought.
    pub fn available_stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.iter().filter(|s| s.availability.is_available())
    }
}

fn trimmed<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    values
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect()
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stock {
    /// Variant identifier.
    #[serde(rename = "child_id")]
    pub id: VariantId,
    /// Owning product.
    #[serde(rename = "parent_id", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Shoe size.
    #[serde(default, deserialize_with = "opt_string")]
    pub size: Option<String>,
    /// Gender cut.
    #[serde(default, deserialize_with = "opt_string")]
    pub gender: Option<String>,
    /// Variant colorway, when it differs from the product.
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Unit price as a display string.
    #[serde(default, deserialize_with = "opt_string")]
    pub price: Option<String>,
    /// Availability status.
    #[serde(default)]
    pub availability: Availability,
}

impl Stock {
    /// Create a variant.
    pub fn new(id: impl Into<VariantId>) -> Self {
        Self {
            id: id.into(),
            product_id: None,
            size: None,
            gender: None,
            color: None,
            price: None,
            availability: Availability::Available,
        }
    }

    /// Parsed unit price.
    pub fn unit_price(&self) -> Option<f64> {
        self.price.as_deref().and_then(parse_price)
    }

    /// "42 (Homme)" label.
    pub fn label(&self) -> String {
        match (self.size.as_deref(), self.gender.as_deref()) {
            (Some(size), Some(gender)) => format!("{} ({})", size, gender),
            (Some(size), None) => size.to_string(),
            (None, Some(gender)) => gender.to_string(),
            (None, None) => self.id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        serde_json::from_value(serde_json::json!({
            "parent_id": 7,
            "brand": " Nike ",
            "model": "Air Max 90",
            "color": "Red",
            "price": "120€",
            "img_1": "https://cdn.example/1.jpg",
            "img_2": "",
            "img_3": "https://cdn.example/3.jpg",
            "stocks": [
                {"child_id": 70, "size": 42, "gender": "Homme", "price": "119,90 €", "availability": "Disponible"},
                {"child_id": 71, "size": "43", "gender": "Femme", "color": "Black", "price": "abc", "availability": "Rupture"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_wire_product() {
        let p = sample();
        assert_eq!(p.id.as_str(), "7");
        assert_eq!(p.stocks.len(), 2);
        assert_eq!(p.stocks[0].size.as_deref(), Some("42"));
        assert!(p.stocks[0].availability.is_available());
        assert_eq!(p.stocks[1].availability.label(), "Rupture");
    }

    #[test]
    fn test_images_skip_empty() {
        assert_eq!(
            sample().images(),
            vec!["https://cdn.example/1.jpg", "https://cdn.example/3.jpg"]
        );
    }

    #[test]
    fn test_attribute_sets() {
        let p = sample();
        assert_eq!(p.colors(), vec!["Red", "Black"]);
        assert_eq!(p.sizes(), vec!["42", "43"]);
        assert_eq!(p.genders(), vec!["Homme", "Femme"]);
        assert_eq!(p.brand_name(), Some("Nike"));
    }

    #[test]
    fn test_price_candidates_skip_unparseable() {
        assert_eq!(sample().price_candidates(), vec![120.0, 119.9]);
    }

    #[test]
    fn test_matchers() {
        let p = sample();
        assert!(p.has_color("black"));
        assert!(p.has_gender(" homme"));
        assert!(p.has_size("42"));
        assert!(!p.has_size("44"));
    }

    #[test]
    fn test_available_stocks() {
        let p = sample();
        let ids: Vec<_> = p.available_stocks().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["70"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample().display_name(), "Nike - Air Max 90");
        assert_eq!(Product::new("9").display_name(), "9");
    }
}
