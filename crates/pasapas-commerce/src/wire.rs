//! Lenient field decoding for backend JSON.
//!
//! The API is inconsistent about scalar types: sizes come back as `42` or
//! `"42"`, prices as `"100€"` or `100`. These helpers fold both shapes into
//! `Option<String>` so the rest of the crate only deals with text.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Deserialize an optional string that may be sent as a number, bool or null.
///
/// Blank strings become `None`.
pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_any(OptStringVisitor)
}

struct OptStringVisitor;

impl<'de> Visitor<'de> for OptStringVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(v.to_string()))
        }
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        if v.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(v))
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_string")]
        value: Option<String>,
    }

    fn probe(json: &str) -> Option<String> {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[test]
    fn test_opt_string_shapes() {
        assert_eq!(probe(r#"{"value": "42"}"#), Some("42".to_string()));
        assert_eq!(probe(r#"{"value": 42}"#), Some("42".to_string()));
        assert_eq!(probe(r#"{"value": 42.5}"#), Some("42.5".to_string()));
        assert_eq!(probe(r#"{"value": null}"#), None);
        assert_eq!(probe(r#"{"value": "  "}"#), None);
        assert_eq!(probe(r#"{}"#), None);
    }
}
