//! Response envelope normalization for catalog endpoints.
//!
//! The products endpoint has shipped several envelope shapes over time.
//! Everything that tolerates that drift lives here; callers always get a
//! plain `Vec<Product>` or `Product`.

use crate::catalog::{Product, Stock};
use crate::error::CommerceError;
use serde_json::Value;

/// Extract the product list from any known envelope.
///
/// Accepted shapes, in order of precedence:
/// - `{"data": [...]}`
/// - `{"products": {"data": [...]}}`
/// - `{"products": [...]}`
/// - `[...]`
///
/// Any other shape yields an empty list. Entries that fail to decode are
/// dropped with a warning rather than failing the whole catalog.
pub fn product_list(body: Value) -> Vec<Product> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("data") {
                items
            } else {
                match map.remove("products") {
                    Some(Value::Object(mut inner)) => match inner.remove("data") {
                        Some(Value::Array(items)) => items,
                        _ => Vec::new(),
                    },
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                }
            }
        }
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Product>(item) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable catalog entry");
                None
            }
        })
        .collect()
}

/// Extract one product from `{"data": {...}}` or a bare object.
pub fn single_product(body: Value) -> Result<Product, CommerceError> {
    let inner = unwrap_data(body);
    if inner.is_null() {
        return Err(CommerceError::ProductNotFound("empty response".to_string()));
    }
    Ok(serde_json::from_value(inner)?)
}

/// Extract a product's variants.
///
/// Accepts a bare array, `{"data": [...]}`, `{"stocks": [...]}`, or a full
/// product object (with or without a `data` wrapper) whose `stocks` are used.
pub fn stock_list(body: Value) -> Result<Vec<Stock>, CommerceError> {
    match unwrap_data(body) {
        Value::Array(items) => Ok(serde_json::from_value(Value::Array(items))?),
        Value::Object(mut map) => match map.remove("stocks") {
            Some(stocks @ Value::Array(_)) => Ok(serde_json::from_value(stocks)?),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

/// Strip a `{"data": ...}` wrapper when present.
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_data_envelope() {
        let body = json!({"success": true, "data": [{"parent_id": 1}, {"parent_id": 2}]});
        assert_eq!(ids(&product_list(body)), vec!["1", "2"]);
    }

    #[test]
    fn test_nested_products_envelope() {
        let body = json!({"products": {"data": [{"parent_id": 3}]}});
        assert_eq!(ids(&product_list(body)), vec!["3"]);
    }

    #[test]
    fn test_products_array_envelope() {
        let body = json!({"products": [{"parent_id": 4}]});
        assert_eq!(ids(&product_list(body)), vec!["4"]);
    }

    #[test]
    fn test_bare_array() {
        let body = json!([{"parent_id": 5}]);
        assert_eq!(ids(&product_list(body)), vec!["5"]);
    }

    #[test]
    fn test_unknown_shape_is_empty() {
        assert!(product_list(json!({"items": []})).is_empty());
        assert!(product_list(json!("oops")).is_empty());
        assert!(product_list(json!({"data": "not a list"})).is_empty());
    }

    #[test]
    fn test_bad_entries_are_dropped() {
        let body = json!([{"parent_id": 1}, {"brand": "no id"}]);
        assert_eq!(ids(&product_list(body)), vec!["1"]);
    }

    #[test]
    fn test_single_product() {
        let p = single_product(json!({"data": {"parent_id": 9, "brand": "Asics"}})).unwrap();
        assert_eq!(p.brand.as_deref(), Some("Asics"));
        assert!(single_product(json!({"data": null})).is_err());
    }

    #[test]
    fn test_stock_list_shapes() {
        let bare = json!([{"child_id": 1, "size": 40}]);
        let wrapped = json!({"data": {"parent_id": 2, "stocks": [{"child_id": 3}]}});
        assert_eq!(stock_list(bare).unwrap().len(), 1);
        assert_eq!(stock_list(wrapped).unwrap()[0].id.as_str(), "3");
        assert!(stock_list(json!({"data": {}})).unwrap().is_empty());
    }
}
