//! Seller-side listing payloads.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Payload for `POST /products`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub brand: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(rename = "img_1", skip_serializing_if = "Option::is_none")]
    pub image_1: Option<String>,
    #[serde(rename = "img_2", skip_serializing_if = "Option::is_none")]
    pub image_2: Option<String>,
    #[serde(rename = "img_3", skip_serializing_if = "Option::is_none")]
    pub image_3: Option<String>,
    /// Variants created right after the product.
    #[serde(skip)]
    pub stocks: Vec<NewStock>,
}

impl NewProduct {
    /// Check required fields before anything is sent.
    pub fn validate(&self) -> Result<(), CommerceError> {
        CommerceError::require(&[
            ("brand", Some(self.brand.as_str())),
            ("model", Some(self.model.as_str())),
        ])?;
        self.stocks.iter().try_for_each(NewStock::validate)
    }
}

/// Payload for `POST /products/{id}/stocks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewStock {
    pub size: String,
    pub gender: String,
    pub price: String,
    pub availability: String,
}

impl NewStock {
    /// Check required fields and that the price parses.
    pub fn validate(&self) -> Result<(), CommerceError> {
        CommerceError::require(&[
            ("size", Some(self.size.as_str())),
            ("gender", Some(self.gender.as_str())),
            ("price", Some(self.price.as_str())),
        ])?;
        if crate::money::parse_price(&self.price).is_none() {
            return Err(CommerceError::ValidationError(format!(
                "price '{}' is not a number",
                self.price
            )));
        }
        Ok(())
    }
}
